use folks_core::JobState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Widget},
};

use super::spinner;
use super::theme::Theme;

/// Statistics job status and result
pub struct StatsBanner<'a> {
    job: &'a JobState,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> StatsBanner<'a> {
    pub fn new(job: &'a JobState, spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            job,
            spinner_frame,
            theme,
        }
    }

    /// Whether there is anything to show
    pub fn is_visible(job: &JobState) -> bool {
        !matches!(job, JobState::Idle)
    }
}

impl Widget for StatsBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 20 {
            return;
        }

        let accent = match self.job {
            JobState::Succeeded(_) => self.theme.green,
            JobState::Failed | JobState::Errored(_) => self.theme.red,
            _ => self.theme.yellow,
        };
        let block = Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let text_style = Style::default().fg(self.theme.fg);
        let value_style = Style::default()
            .fg(accent)
            .add_modifier(Modifier::BOLD);
        let dim_style = Style::default().fg(self.theme.fg_dim);

        match self.job {
            JobState::Idle => {}
            JobState::Submitting => {
                let text = format!("{} Submitting report task…", spinner(self.spinner_frame));
                buf.set_string(inner.x, inner.y, text, value_style);
            }
            JobState::Polling { task, attempts } => {
                let text = format!(
                    "{} Generating report ({}, poll {})",
                    spinner(self.spinner_frame),
                    task,
                    attempts
                );
                buf.set_string(inner.x, inner.y, text, value_style);
            }
            JobState::Succeeded(summary) => {
                let parts = [
                    ("Mean age", format!("{:.2}", summary.mean_age)),
                    ("Std dev", format!("{:.2}", summary.stddev_age)),
                    ("Total", summary.total.to_string()),
                ];
                let mut x = inner.x;
                for (label, value) in parts {
                    buf.set_string(x, inner.y, format!("{}: ", label), text_style);
                    x += label.len() as u16 + 2;
                    buf.set_string(x, inner.y, &value, value_style);
                    x += value.len() as u16 + 4;
                }
                let hint = "x ✕";
                let hint_x = (inner.x + inner.width).saturating_sub(hint.chars().count() as u16);
                if hint_x > x {
                    buf.set_string(hint_x, inner.y, hint, dim_style);
                }
            }
            JobState::Failed => {
                buf.set_string(inner.x, inner.y, "Task failed.", value_style);
            }
            JobState::Errored(error) => {
                buf.set_string(inner.x, inner.y, error.to_string(), value_style);
            }
        }
    }
}
