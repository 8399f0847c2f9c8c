//! TUI application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

use crate::controller::Controller;
use crate::document::Document;
use crate::export::FileExporter;
use crate::service::SummaryRequest;
use crate::style::SummaryStyle;

use super::picker::FilePickerState;

/// Lines moved per PageUp/PageDown in the result view
const PAGE_SCROLL: u16 = 10;

/// One-line feedback that is not a submission error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct App {
    pub controller: Controller,
    pub picker: Option<FilePickerState>,
    pub status: Option<StatusMessage>,
    /// Vertical scroll of the result text
    pub scroll: u16,
    /// Spinner frame while a submission is in flight
    pub animation_tick: u8,
    pub should_quit: bool,
    exporter: FileExporter,
    start_dir: PathBuf,
}

impl App {
    pub fn new(exporter: FileExporter, start_dir: &Path) -> Self {
        Self {
            controller: Controller::new(),
            picker: None,
            status: None,
            scroll: 0,
            animation_tick: 0,
            should_quit: false,
            exporter,
            start_dir: start_dir.to_path_buf(),
        }
    }

    pub fn tick(&mut self) {
        if self.controller.is_submitting() {
            self.animation_tick = self.animation_tick.wrapping_add(1);
        }
    }

    /// Handle a key press. Returns a request when the key dispatched a submission.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SummaryRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.picker.is_some() {
            self.handle_picker_key(key);
            return None;
        }

        if self.controller.is_result_open() && self.handle_result_key(key) {
            return None;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('o') => self.open_picker(),
            KeyCode::Char('c') => self.controller.clear_document(),
            KeyCode::Char('1') => self.controller.select_style(SummaryStyle::Brief),
            KeyCode::Char('2') => self.controller.select_style(SummaryStyle::Normal),
            KeyCode::Char('3') => self.controller.select_style(SummaryStyle::Detailed),
            KeyCode::Left => self.controller.select_style(self.controller.style().prev()),
            KeyCode::Right => self.controller.select_style(self.controller.style().next()),
            KeyCode::Char('s') => {
                let request = self.controller.begin_submission();
                if request.is_some() {
                    self.status = None;
                    self.animation_tick = 0;
                }
                return request;
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        None
    }

    /// Keys owned by the open result surface. Returns true when consumed.
    fn handle_result_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => {
                self.controller.toggle_view();
                self.scroll = 0;
            }
            KeyCode::Esc => {
                self.controller.close_result();
                self.scroll = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_SCROLL),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE_SCROLL),
            KeyCode::Enter | KeyCode::Char('o') => {}
            _ => return false,
        }
        true
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.picker = None,
            KeyCode::Up | KeyCode::Char('k') => picker.move_up(),
            KeyCode::Down | KeyCode::Char('j') => picker.move_down(),
            KeyCode::Backspace | KeyCode::Left => picker.go_parent(),
            KeyCode::Enter => {
                if picker.enter_directory() {
                    return;
                }
                let Some(path) = picker.selected().map(|entry| entry.path.clone()) else {
                    return;
                };
                self.start_dir = picker.current_dir.clone();
                self.picker = None;
                self.pick_file(&path);
            }
            _ => {}
        }
    }

    fn open_picker(&mut self) {
        self.picker = Some(FilePickerState::new(&self.start_dir));
    }

    fn pick_file(&mut self, path: &Path) {
        match Document::from_path(path) {
            Ok(document) => {
                self.status = None;
                self.controller.select_document(document);
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load document");
                self.status = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    fn export(&mut self) {
        let Some(artifact) = self.controller.export_summary() else {
            return;
        };
        self.status = Some(match self.exporter.save(&artifact) {
            Ok(path) => StatusMessage::Info(format!("Saved {}", path.display())),
            Err(e) => StatusMessage::Error(e.to_string()),
        });
    }
}
