pub const PAGE_SIZE: u64 = 3;

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u64);

impl Page {
    pub fn new(number: u64) -> Self {
        Page(number.max(1))
    }

    /// Reads the `page` query value the way a leading-integer parse would:
    /// `"2abc"` is page 2, while absent, empty, non-numeric, zero and
    /// negative values all land on page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Page(1);
        };

        let trimmed = raw.trim_start();
        if trimmed.starts_with('-') {
            return Page(1);
        }
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();

        match digits.parse::<u64>() {
            Ok(n) if n >= 1 => Page(n),
            Ok(_) => Page(1),
            // overflow still means "a very large page"
            Err(_) if !digits.is_empty() => Page(u64::MAX),
            Err(_) => Page(1),
        }
    }

    pub fn number(self) -> u64 {
        self.0
    }

    /// Capped at `i64::MAX`, the largest skip the server accepts.
    pub fn skip(self) -> u64 {
        (self.0 - 1).saturating_mul(PAGE_SIZE).min(i64::MAX as u64)
    }

    pub fn limit(self) -> i64 {
        PAGE_SIZE as i64
    }
}

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

pub fn total_pages(total_items: u64) -> u64 {
    total_items.div_ceil(PAGE_SIZE)
}
