//! Blueprint-style ASCII banner with gradient (CONSCHED).
//! Uses figlet's built-in standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Safety Orange (#ff6f00).
const SAFETY_ORANGE: (u8, u8, u8) = (0xff, 0x6f, 0x00);
/// Blueprint Blue (#1e88e5).
const BLUEPRINT_BLUE: (u8, u8, u8) = (0x1e, 0x88, 0xe5);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "CONSCHED" in ASCII art with a gradient from
/// Safety Orange to Blueprint Blue, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("CONSCHED").map(|fig| fig.to_string()))
        .unwrap_or_else(|| "CONSCHED\n".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(SAFETY_ORANGE, BLUEPRINT_BLUE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: BLUEPRINT_BLUE.0,
        g: BLUEPRINT_BLUE.1,
        b: BLUEPRINT_BLUE.2,
    }));
    let _ = out.execute(Print(format!(
        "v{}  AI construction schedule generator\r\n",
        version
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(SAFETY_ORANGE, BLUEPRINT_BLUE, 0.0), SAFETY_ORANGE);
        assert_eq!(lerp_rgb(SAFETY_ORANGE, BLUEPRINT_BLUE, 1.0), BLUEPRINT_BLUE);
    }
}
