/// Read-only access to a linear RGB image.
///
/// Implementors may carry extra channels; only the first three are read.
pub trait ImageView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;

    /// RGB triple at `(x, y)`.
    fn rgb(&self, x: usize, y: usize) -> [f32; 3];

    fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }
}
