//! Text screens shown outside of play.
use crate::core::game::{MenuItem, Phase};
use crate::render::framebuffer::Framebuffer;

pub const TITLE: &str = "Labyrinth of Fear 3D";

const INSTRUCTIONS: &[&str] = &[
    "Goal",
    "",
    "Explore the labyrinth and find the door that leads out.",
    "Avoid the enemies (E) roaming the halls: if one reaches you, the game is over.",
    "",
    "Controls",
    "",
    "W - move forward",
    "S - move backward",
    "A - turn left",
    "D - turn right",
    "Ctrl-C - quit",
    "",
    "The map in the top-left corner shows walls (#), the door (D),",
    "enemies (E), your position (P) and where your view reaches (*).",
    "",
    "Press Enter to return to the main menu...",
];

pub fn draw_menu(fb: &mut Framebuffer, selected: usize) {
    fb.clear();
    let items = MenuItem::ALL;
    let top = (fb.height / 2).saturating_sub(items.len() / 2);
    fb.put_centered(top.saturating_sub(2), TITLE);

    let widest = items.iter().map(|i| i.label().len()).max().unwrap_or(0) + 2;
    let x = fb.width.saturating_sub(widest) / 2;
    for (i, item) in items.iter().enumerate() {
        let cursor = if i == selected { "> " } else { "  " };
        fb.put_str(x, top + i, &format!("{cursor}{}", item.label()));
    }
}

pub fn draw_instructions(fb: &mut Framebuffer) {
    fb.clear();
    for (y, line) in INSTRUCTIONS.iter().enumerate() {
        fb.put_str(0, y, line);
    }
}

fn draw_message(fb: &mut Framebuffer, headline: &str) {
    fb.clear();
    fb.put_str(0, 0, headline);
    fb.put_str(0, 1, "Press Enter to return to the main menu...");
}

/// Draw the screen for a non-play phase. Returns `false` for phases without a text screen.
pub fn draw_phase(fb: &mut Framebuffer, phase: Phase) -> bool {
    match phase {
        Phase::MainMenu { selected } => draw_menu(fb, selected),
        Phase::Instructions => draw_instructions(fb),
        Phase::Victory => draw_message(fb, "You Won! You have found the door of truth!"),
        Phase::Defeat => draw_message(fb, "Game Over! The enemy has consumed your soul!"),
        Phase::Playing | Phase::Exit => return false,
    }
    true
}
