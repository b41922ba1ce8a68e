/// Callback surface for the long read and write loops.
///
/// Decoding an artifact drives one `begin`/`tick`.../`finish` cycle, with a
/// tick per decoded frame; writers report `begin` and `finish` around the
/// whole document. Implementations are injected when configuring a
/// [`crate::Converter`]; nothing is reported by default.
pub trait Progress {
    fn begin(&mut self, label: &str, total: usize) {
        let _ = (label, total);
    }

    fn tick(&mut self) {}

    fn finish(&mut self) {}
}

/// The default sink. Reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}
