//! crossterm renderer for [`Screen`] view models.

use core::fmt::Write as _;
use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode, size,
    },
};
use heapless::String as HeaplessString;
use monkeyread_core::{
    render::{Gallery, Screen},
    session::ReadingStats,
    word_info::{DelayFactor, Region, Run},
};

const ACCENT: Color = Color::Yellow;
const MUTED: Color = Color::DarkGrey;
const GALLERY_GAP: usize = 3;
const KEY_HELP: &str = "space play/pause  up/down wpm  left/right step  [ ] jump  r reset  b bold  q quit";

pub(super) struct TerminalRenderer<W: Write> {
    out: W,
    anchor_percent: u16,
    active: bool,
}

impl TerminalRenderer<Stdout> {
    /// Switch the terminal to raw mode on the alternate screen.
    pub(super) fn enter(anchor_percent: u16) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self {
            out,
            anchor_percent,
            active: true,
        })
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub(super) fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    }

    pub(super) fn render(&mut self, screen: Screen<'_>) -> io::Result<()> {
        let (width, height) = size()?;
        self.draw(screen, width, height)
    }

    fn draw(&mut self, screen: Screen<'_>, width: u16, height: u16) -> io::Result<()> {
        let anchor = anchor_column(width, self.anchor_percent);
        let mid = height / 2;
        queue!(self.out, ResetColor, Clear(ClearType::All))?;

        match screen {
            Screen::Empty {
                title,
                hint,
                wpm,
                emphasis,
                stats,
            } => {
                self.header(title, wpm, width)?;
                let col = (width / 2).saturating_sub(char_len(hint) as u16 / 2);
                queue!(
                    self.out,
                    MoveTo(col, mid),
                    SetForegroundColor(MUTED),
                    SetAttribute(Attribute::Italic),
                    Print(hint),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
                self.footer(status_line(false, emphasis, stats, None), height)?;
            }
            Screen::Reading {
                title,
                layout,
                delay,
                wpm,
                playing,
                emphasis,
                progress_pct,
                progress_label,
                gallery,
                stats,
            } => {
                self.header(title, wpm, width)?;

                queue!(
                    self.out,
                    SetForegroundColor(MUTED),
                    MoveTo(anchor, mid.saturating_sub(1)),
                    Print('│'),
                    MoveTo(anchor, mid + 1),
                    Print('│'),
                    ResetColor
                )?;

                let start = anchor.saturating_sub(layout.before.chars() as u16);
                queue!(self.out, MoveTo(start, mid))?;
                self.region(layout.before)?;
                self.pivot(layout.pivot)?;
                self.region(layout.after)?;

                self.gallery(gallery, anchor, width, mid + 3)?;
                self.progress(progress_pct, progress_label, width, mid + 5)?;
                self.footer(status_line(playing, emphasis, stats, Some(delay)), height)?;
            }
        }

        self.out.flush()
    }

    fn header(&mut self, title: &str, wpm: u16, width: u16) -> io::Result<()> {
        let mut rate: HeaplessString<16> = HeaplessString::new();
        let _ = write!(rate, "{} wpm", wpm);
        let title: String = title
            .chars()
            .take((width as usize).saturating_sub(rate.len() + 2))
            .collect();

        queue!(
            self.out,
            MoveTo(0, 0),
            SetForegroundColor(MUTED),
            Print(title),
            MoveTo(width.saturating_sub(rate.len() as u16), 0),
            SetForegroundColor(ACCENT),
            SetAttribute(Attribute::Bold),
            Print(rate.as_str()),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }

    fn region(&mut self, region: Region<'_>) -> io::Result<()> {
        for run in region.runs() {
            self.run(run, None)?;
        }
        Ok(())
    }

    fn pivot(&mut self, pivot: Run<'_>) -> io::Result<()> {
        self.run(pivot, Some(ACCENT))
    }

    fn run(&mut self, run: Run<'_>, color: Option<Color>) -> io::Result<()> {
        if run.text.is_empty() {
            return Ok(());
        }
        if let Some(color) = color {
            queue!(self.out, SetForegroundColor(color))?;
        }
        if run.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(
            self.out,
            Print(run.text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }

    fn gallery(&mut self, gallery: Gallery<'_>, anchor: u16, width: u16, row: u16) -> io::Result<()> {
        for cell in gallery_cells(gallery, anchor, width) {
            let color = if cell.current { ACCENT } else { MUTED };
            queue!(
                self.out,
                MoveTo(cell.col, row),
                SetForegroundColor(color),
                Print(cell.text),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn progress(&mut self, pct: u8, label: &str, width: u16, row: u16) -> io::Result<()> {
        let bar_width = (width as usize).saturating_sub(char_len(label) + 2);
        let (filled, empty) = progress_bar(bar_width, pct);
        queue!(
            self.out,
            MoveTo(0, row),
            SetForegroundColor(ACCENT),
            Print("━".repeat(filled)),
            SetForegroundColor(MUTED),
            Print("─".repeat(empty)),
            Print("  "),
            Print(label),
            ResetColor
        )
    }

    fn footer(&mut self, status: StatusLine, height: u16) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, height.saturating_sub(2)),
            Print(status.as_str()),
            MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(MUTED),
            Print(KEY_HELP),
            ResetColor
        )
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

type StatusLine = HeaplessString<96>;

fn status_line(
    playing: bool,
    emphasis: bool,
    stats: ReadingStats,
    delay: Option<DelayFactor>,
) -> StatusLine {
    let mut status = StatusLine::new();
    let _ = write!(
        status,
        "{}  bold {}  session {}  total {}",
        if playing { "playing" } else { "paused" },
        if emphasis { "on" } else { "off" },
        stats.session_word_count,
        stats.total_words_read
    );
    if let Some(delay) = delay {
        let _ = write!(status, "  pause x{:.1}", delay.value());
    }
    status
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn anchor_column(width: u16, anchor_percent: u16) -> u16 {
    ((width as u32 * anchor_percent.min(100) as u32) / 100) as u16
}

fn progress_bar(bar_width: usize, pct: u8) -> (usize, usize) {
    let filled = (bar_width * pct.min(100) as usize) / 100;
    (filled, bar_width - filled)
}

#[derive(Debug, Eq, PartialEq)]
struct GalleryCell {
    col: u16,
    text: String,
    current: bool,
}

/// Lay gallery units out on one line so the current unit is centred on
/// `anchor`, clipping whatever falls outside `0..width`.
fn gallery_cells(gallery: Gallery<'_>, anchor: u16, width: u16) -> Vec<GalleryCell> {
    let mut positioned = Vec::with_capacity(gallery.len());
    let mut cursor = 0isize;
    let mut current_center = 0isize;

    for item in gallery.items() {
        let len = char_len(item.unit) as isize;
        if item.current {
            current_center = cursor + len / 2;
        }
        positioned.push((cursor, item.unit, item.current));
        cursor += len + GALLERY_GAP as isize;
    }

    let shift = anchor as isize - current_center;
    let width = width as isize;
    let mut cells = Vec::with_capacity(positioned.len());

    for (offset, unit, current) in positioned {
        let start = offset + shift;
        let skip = (-start).max(0) as usize;
        let col = start.max(0);
        if col >= width {
            break;
        }

        let text: String = unit
            .chars()
            .skip(skip)
            .take((width - col) as usize)
            .collect();
        if text.is_empty() {
            continue;
        }

        cells.push(GalleryCell {
            col: col as u16,
            text,
            current,
        });
    }

    cells
}
