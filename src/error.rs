use std::fmt;
use std::io;

pub const USAGE: &str = "\
Usage: [-b | -a | -h] [-frequency | -num_unique] <filename>

-b - Use an Unbalanced BST
-a - Use an AVL Tree
-h - Use a Hashtable

-frequency - Print all the word/frequency pairs, ordered by frequency, and then by the words in lexicographic order.
-num_unique - Print the number of unique words in the document. This is the total number of distinct (different) words in the document. Words that appear more than once are only counted as a single word for this statistic";

// Every variant is terminal for the run; main prints it and exits normally.
#[derive(Debug)]
pub enum WordCountError {
    Usage,
    InvalidCounter(String),
    InvalidMode(String),
    FileNotFound(String),
    Parse(io::Error),
    Output(io::Error),
}

impl fmt::Display for WordCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordCountError::Usage => write!(f, "{}", USAGE),
            WordCountError::InvalidCounter(token) => {
                write!(f, "Invalid choice for first argument: {}\n\n{}", token, USAGE)
            }
            WordCountError::InvalidMode(token) => {
                write!(f, "Invalid choice for second argument: {}\n\n{}", token, USAGE)
            }
            WordCountError::FileNotFound(path) => write!(f, "The file \"{}\" does not exist", path),
            WordCountError::Parse(e) => write!(f, "An error occurred when parsing the file!:\n{}", e),
            WordCountError::Output(e) => write!(f, "Failed to write report: {}", e),
        }
    }
}

impl std::error::Error for WordCountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WordCountError::Parse(e) | WordCountError::Output(e) => Some(e),
            _ => None,
        }
    }
}
