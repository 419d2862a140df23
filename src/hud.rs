//! HUD text formatting

/// The single score line shown above the game
pub fn score_line(score: u64, coins: u64, level: u32) -> String {
    format!("Score: {} | Coins: {} | Level: {}", score, coins, level)
}

/// FPS counter text
pub fn fps_line(fps: u32) -> String {
    format!("{} FPS", fps)
}
