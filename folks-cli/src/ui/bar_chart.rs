/// Unicode partial block characters for smooth progress bars
const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render `done / total` as a bar exactly `width` cells wide
pub fn progress_bar(done: usize, total: usize, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let ratio = if total == 0 {
        0.0
    } else {
        (done as f64 / total as f64).clamp(0.0, 1.0)
    };
    let filled = ratio * width as f64;
    let full_blocks = (filled.floor() as usize).min(width);
    let partial = ((filled - full_blocks as f64) * 8.0).round() as usize;

    let mut bar: String = std::iter::repeat_n(BLOCKS[8], full_blocks).collect();
    if full_blocks < width && partial > 0 {
        bar.push(BLOCKS[partial.min(8)]);
    }
    let len = bar.chars().count();
    bar.extend(std::iter::repeat_n(' ', width - len));
    bar
}
