use std::cmp::Ordering;

/// Stable top-down merge sort driven by `compare`.
///
/// Elements that compare `Equal` keep their input order, which lets callers
/// layer sorts: sort by the secondary key first, then by the primary key.
pub fn merge_sort<T, F>(items: &mut Vec<T>, compare: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    sort_range(items, &compare);
}

fn sort_range<T, F>(items: &mut Vec<T>, compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }

    let mid = items.len() / 2;
    let mut right = items.split_off(mid);
    let mut left = std::mem::take(items);

    sort_range(&mut left, compare);
    sort_range(&mut right, compare);
    merge(items, left, right, compare);
}

fn merge<T, F>(out: &mut Vec<T>, left: Vec<T>, right: Vec<T>, compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    out.reserve(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            // Ties go to the left half to keep the sort stable.
            (Some(l), Some(r)) => compare(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_left { left.next() } else { right.next() };
        out.extend(next);
    }
}
