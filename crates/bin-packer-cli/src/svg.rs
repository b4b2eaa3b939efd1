//! SVG rendering of packed bins. Pure consumer of the layout: items are
//! drawn at their committed positions, rotated ones in a different colour,
//! labelled with their id.

use std::io::Write;

use bin_packer_core::Bin;
use svg_fmt::{black, rectangle, rgb, text, BeginSvg, EndSvg, Stroke};

/// Dump a visual representation of one bin in SVG format. Placement
/// coordinates are bottom-left based, so the y axis is flipped for SVG.
pub fn dump_svg(bin: &Bin, output: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        output,
        "{}",
        BeginSvg {
            w: bin.width as f32,
            h: bin.height as f32,
        }
    )?;

    writeln!(
        output,
        "    {}",
        rectangle(0.0, 0.0, bin.width as f32, bin.height as f32)
            .fill(rgb(40, 40, 40))
            .stroke(Stroke::Color(black(), 1.0))
    )?;

    for item in &bin.items {
        let x = item.x as f32;
        let y = bin.height as f32 - item.y as f32 - item.height as f32;
        let fill = if item.rotated {
            rgb(180, 70, 70)
        } else {
            rgb(70, 70, 180)
        };
        writeln!(
            output,
            "    {}",
            rectangle(x, y, item.width as f32, item.height as f32)
                .fill(fill)
                .stroke(Stroke::Color(black(), 1.0))
        )?;
        writeln!(
            output,
            "    {}",
            text(
                x + item.width as f32 / 2.0,
                y + item.height as f32 / 2.0,
                item.id.clone(),
            )
            .size(item.height as f32 * 0.4)
            .color(rgb(255, 255, 255))
        )?;
    }

    writeln!(output, "{}", EndSvg)
}
