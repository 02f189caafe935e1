use std::fmt;

/// Renders a key-value pair as `<key, value>` in table dumps and traversals.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EntryDisplay<'a, K, V> {
    /// The key to render
    pub(crate) key: &'a K,
    /// The value to render
    pub(crate) value: &'a V,
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for EntryDisplay<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.key, self.value)
    }
}

/// Writes `[a, b, c]`, emitting the separator only between consecutive items
pub(crate) fn write_bracketed<I>(f: &mut impl fmt::Write, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    f.write_char('[')?;
    for (position, item) in items.into_iter().enumerate() {
        if position > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_char(']')
}
