/// Flat row-major grid of characters, one per terminal cell.
pub struct Framebuffer {
    pub buffer: Vec<char>,
    pub width: usize,
    pub height: usize,
    pub background: char,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![' '; width * height],
            width,
            height,
            background: ' ',
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.buffer.fill(self.background);
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, ch: char) {
        if let Some(i) = self.index(x, y) {
            self.buffer[i] = ch;
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> char {
        self.index(x, y).map(|i| self.buffer[i]).unwrap_or(self.background)
    }

    /// Write `s` starting at the flat offset `at`, wrapping onto following rows like a console would.
    pub fn put_at_offset(&mut self, at: usize, s: &str) {
        for (slot, ch) in self.buffer.iter_mut().skip(at).zip(s.chars()) {
            *slot = ch;
        }
    }

    /// Write `s` on row `y` from column `x`, clipped at the right edge.
    pub fn put_str(&mut self, x: usize, y: usize, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width {
                break;
            }
            self.set(x + i, y, ch);
        }
    }

    /// Write `s` centred on row `y`.
    pub fn put_centered(&mut self, y: usize, s: &str) {
        let len = s.chars().count();
        let x = self.width.saturating_sub(len) / 2;
        self.put_str(x, y, s);
    }

    pub fn row(&self, y: usize) -> &[char] {
        let start = y.min(self.height) * self.width;
        let end = (y + 1).min(self.height) * self.width;
        &self.buffer[start..end]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.buffer.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_clipped() {
        let mut fb = Framebuffer::new(4, 2);
        fb.put_str(2, 0, "abcd");
        fb.set(9, 9, 'x');
        assert_eq!(fb.row(0), &[' ', ' ', 'a', 'b']);
        assert_eq!(fb.get(9, 9), ' ');
    }

    #[test]
    fn offset_writes_wrap_rows() {
        let mut fb = Framebuffer::new(3, 2);
        fb.put_at_offset(1, "wxyz!");
        assert_eq!(fb.buffer, vec![' ', 'w', 'x', 'y', 'z', '!']);
    }

    #[test]
    fn centred_text() {
        let mut fb = Framebuffer::new(7, 1);
        fb.put_centered(0, "abc");
        assert_eq!(fb.row(0).iter().collect::<String>(), "  abc  ");
    }
}
