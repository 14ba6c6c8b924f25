/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Sums the amounts of every item yielded by `items`, starting from `+0.0`.
pub fn total<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    // `Iterator::sum` on floats starts at -0.0, which renders as "-0.00".
    items
        .into_iter()
        .fold(0.0, |acc, item| acc + item.amount())
}
