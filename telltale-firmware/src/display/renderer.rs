//! Screen rendering
//!
//! Builds the status screen sent to the cluster display unit:
//! 8 rows of 21 characters of plain text.

use core::fmt::Write;

use heapless::String;

use telltale_core::debounce::ChannelId;
use telltale_core::status::DashboardStatus;
use telltale_core::traits::TimeOfDay;

/// Display geometry
pub const DISPLAY_ROWS: u8 = 8;
pub const DISPLAY_COLS: u8 = 21;

/// A screen buffer that can be sent to the display
pub struct Screen {
    /// Lines of text (8 rows max)
    lines: [String<22>; 8],
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Clear the screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set text at a specific row
    pub fn set_line(&mut self, row: u8, text: &str) {
        if (row as usize) < self.lines.len() {
            self.lines[row as usize].clear();
            let _ =
                self.lines[row as usize].push_str(&text[..text.len().min(DISPLAY_COLS as usize)]);
        }
    }

    /// Get a line of text
    pub fn get_line(&self, row: u8) -> &str {
        if (row as usize) < self.lines.len() {
            self.lines[row as usize].as_str()
        } else {
            ""
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen renderer for the dashboard status
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the boot screen
    pub fn render_boot(&mut self) {
        self.screen.clear();
        self.screen.set_line(2, "     TELLTALE");
        self.screen.set_line(4, "    Dashboard");
        self.screen.set_line(6, "  Starting...");
    }

    /// Render the status screen
    ///
    /// `time` is None when neither the RTC nor an uptime fallback
    /// produced a reading; that row is left blank rather than stale.
    pub fn render_status(&mut self, status: &DashboardStatus, time: Option<TimeOfDay>) {
        self.screen.clear();

        let mut line: String<22> = String::new();
        let _ = write!(line, "Speed: {} km/h", status.speed_kmh());
        self.screen.set_line(0, &line);

        line.clear();
        let _ = write!(
            line,
            "Ind: L {} R {}",
            on_off(status.indicator(ChannelId::Left)),
            on_off(status.indicator(ChannelId::Right)),
        );
        self.screen.set_line(1, &line);

        line.clear();
        let _ = write!(line, "Key: {}", on_off(status.key_on()));
        self.screen.set_line(2, &line);

        line.clear();
        let _ = write!(line, "Battery: {}%", status.battery_percent());
        self.screen.set_line(3, &line);

        line.clear();
        let _ = write!(
            line,
            "Side Stand: {}",
            if status.side_stand_down() { "Down" } else { "Up" }
        );
        self.screen.set_line(4, &line);

        line.clear();
        let _ = write!(line, "Mode: {}", status.drive_mode().label());
        self.screen.set_line(5, &line);

        if let Some(time) = time {
            line.clear();
            let _ = write!(line, "Time: {}", time.format_hm());
            self.screen.set_line(6, &line);
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_status_rows() {
        let mut status = DashboardStatus::new();
        status.set_speed_kmh(42);
        status.set_indicator(ChannelId::Left, true);

        let mut renderer = Renderer::new();
        let time = TimeOfDay { hour: 7, minute: 5, second: 0 };
        renderer.render_status(&status, Some(time));

        let screen = renderer.screen();
        assert_eq!(screen.get_line(0), "Speed: 42 km/h");
        assert_eq!(screen.get_line(1), "Ind: L ON R OFF");
        assert_eq!(screen.get_line(2), "Key: ON");
        assert_eq!(screen.get_line(3), "Battery: 100%");
        assert_eq!(screen.get_line(4), "Side Stand: Up");
        assert_eq!(screen.get_line(5), "Mode: Normal");
        assert_eq!(screen.get_line(6), "Time: 7:05");
    }

    #[test]
    fn test_no_time_leaves_row_blank() {
        let status = DashboardStatus::new();
        let mut renderer = Renderer::new();
        renderer.render_status(&status, None);
        assert_eq!(renderer.screen().get_line(6), "");
    }

    #[test]
    fn test_long_line_truncated() {
        let mut screen = Screen::new();
        screen.set_line(0, "0123456789012345678901234567890");
        assert_eq!(screen.get_line(0).len(), DISPLAY_COLS as usize);
    }
}
