use super::board::COLS;

/// Anything a caller may hand over as a column argument.
///
/// Integers are taken as-is, floats are truncated toward zero (so `5.0` and
/// `5.9` both mean column 5) and strings are parsed as floats first. Anything
/// that does not land in `0..COLS` becomes `None`.
pub trait ColumnIndex {
    fn to_column(self) -> Option<usize>;
}

impl ColumnIndex for usize {
    fn to_column(self) -> Option<usize> {
        (self < COLS).then_some(self)
    }
}

impl ColumnIndex for u8 {
    fn to_column(self) -> Option<usize> {
        usize::from(self).to_column()
    }
}

impl ColumnIndex for u32 {
    fn to_column(self) -> Option<usize> {
        usize::try_from(self).ok()?.to_column()
    }
}

impl ColumnIndex for i32 {
    fn to_column(self) -> Option<usize> {
        usize::try_from(self).ok()?.to_column()
    }
}

impl ColumnIndex for i64 {
    fn to_column(self) -> Option<usize> {
        usize::try_from(self).ok()?.to_column()
    }
}

impl ColumnIndex for f64 {
    fn to_column(self) -> Option<usize> {
        if !self.is_finite() {
            return None;
        }
        let truncated = self.trunc();
        // -0.5 truncates to -0.0, which is column 0
        if truncated < 0.0 || truncated >= COLS as f64 {
            return None;
        }
        Some(truncated as usize)
    }
}

impl ColumnIndex for f32 {
    fn to_column(self) -> Option<usize> {
        f64::from(self).to_column()
    }
}

impl ColumnIndex for &str {
    fn to_column(self) -> Option<usize> {
        self.trim().parse::<f64>().ok()?.to_column()
    }
}

impl ColumnIndex for &String {
    fn to_column(self) -> Option<usize> {
        self.as_str().to_column()
    }
}
