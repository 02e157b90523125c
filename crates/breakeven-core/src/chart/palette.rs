use super::primitives::Color;

/// Number of distinct colours before the comparison chart starts reusing them.
pub const PALETTE_SIZE: usize = 20;

/// Categorical palette: ten hues, each as a dark and a light shade.
pub const TAB20: [Color; PALETTE_SIZE] = [
    Color::from_u32(0x1f77b4),
    Color::from_u32(0xaec7e8),
    Color::from_u32(0xff7f0e),
    Color::from_u32(0xffbb78),
    Color::from_u32(0x2ca02c),
    Color::from_u32(0x98df8a),
    Color::from_u32(0xd62728),
    Color::from_u32(0xff9896),
    Color::from_u32(0x9467bd),
    Color::from_u32(0xc5b0d5),
    Color::from_u32(0x8c564b),
    Color::from_u32(0xc49c94),
    Color::from_u32(0xe377c2),
    Color::from_u32(0xf7b6d2),
    Color::from_u32(0x7f7f7f),
    Color::from_u32(0xc7c7c7),
    Color::from_u32(0xbcbd22),
    Color::from_u32(0xdbdb8d),
    Color::from_u32(0x17becf),
    Color::from_u32(0x9edae5),
];

/// Colour for the series at `index`, cycling through the palette.
pub fn color_at(index: usize) -> Color {
    TAB20[index % PALETTE_SIZE]
}
