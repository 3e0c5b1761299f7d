//! The dashboard controller: one state machine owning layout, filter, and
//! tooltip state, fed by key, mouse, tick, and resize events in arrival
//! order.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tracing::warn;

use crate::action::Action;
use crate::alerts::{self, AlertFlags};
use crate::config::ProfileConfiguration;
use crate::layout::{ColumnLayout, Region, ResizeCommand};
use crate::metrics::{MetricsProvider, ProcessRecord, Snapshot};
use crate::proc_table::{self, FilterSortState};
use crate::system::control::ProcessControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filtering,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TooltipState {
    pub x: u16,
    pub y: u16,
    pub region: Option<Region>,
    pub visible: bool,
}

pub struct App {
    pub running: bool,
    provider: Box<dyn MetricsProvider>,
    control: Box<dyn ProcessControl>,
    pub config: ProfileConfiguration,
    pub snapshot: Snapshot,
    pub layout: ColumnLayout,
    pub input_mode: InputMode,
    pub filter_sort: FilterSortState,
    pub selected_index: usize,
    /// Filtered and sorted records backing the process table this frame.
    pub visible: Vec<ProcessRecord>,
    pub alerts: AlertFlags,
    pub tooltip: TooltipState,
    /// Row area of the process table, recorded during render so pointer
    /// clicks can be mapped back to rows.
    pub process_table_area: Option<Rect>,
}

impl App {
    pub fn new(
        config: ProfileConfiguration,
        provider: Box<dyn MetricsProvider>,
        control: Box<dyn ProcessControl>,
    ) -> Self {
        let layout = ColumnLayout::new(config.columns.gpu, config.columns.process);
        App {
            running: true,
            provider,
            control,
            config,
            snapshot: Snapshot::default(),
            layout,
            input_mode: InputMode::Normal,
            filter_sort: FilterSortState::default(),
            selected_index: 0,
            visible: Vec::new(),
            alerts: AlertFlags::default(),
            tooltip: TooltipState::default(),
            process_table_area: None,
        }
    }

    /// One refresh cycle: fetch, replace the snapshot, re-derive alert flags
    /// and the visible process rows. A failed fetch keeps the previous
    /// snapshot; the scheduler has already queued the next tick either way.
    pub fn on_tick(&mut self) {
        match self.provider.snapshot() {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.refresh_derived();
            }
            Err(err) => {
                warn!(%err, "metrics fetch failed, keeping previous snapshot");
            }
        }
    }

    fn refresh_derived(&mut self) {
        self.alerts = alerts::evaluate(&self.snapshot, &self.config.alerts);
        let filter = self.effective_filter().to_string();
        self.visible =
            proc_table::select(&self.snapshot.processes, &filter, self.filter_sort.sort_key);
        if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
    }

    /// The filter the table should show right now: the pending buffer while
    /// the user is typing, the committed one otherwise.
    pub fn effective_filter(&self) -> &str {
        match self.input_mode {
            InputMode::Filtering => &self.filter_sort.pending,
            InputMode::Normal => &self.filter_sort.filter,
        }
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.visible.get(self.selected_index).map(|r| r.pid)
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.layout.set_terminal_size(width, height);
    }

    /// Releases the metrics backend; called once when the loop ends.
    pub fn shutdown(&mut self) {
        self.provider.shutdown();
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Filtering => self.map_key_filter(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('[') => Action::Resize(ResizeCommand::ShrinkLeft),
            KeyCode::Char(']') => Action::Resize(ResizeCommand::GrowLeft),
            KeyCode::Char('{') => Action::Resize(ResizeCommand::ShrinkMiddle),
            KeyCode::Char('}') => Action::Resize(ResizeCommand::GrowMiddle),
            KeyCode::Char('s') => Action::CycleSortMode,
            KeyCode::Char('/') => Action::EnterFilterMode,
            KeyCode::Char('k') | KeyCode::F(9) => Action::Terminate,
            KeyCode::F(8) => Action::ReniceUp,
            KeyCode::F(7) => Action::ReniceDown,
            KeyCode::Up => Action::SelectPrev,
            KeyCode::Down => Action::SelectNext,
            _ => Action::None,
        }
    }

    fn map_key_filter(&self, key: KeyEvent) -> Action {
        match key.code {
            // Enter and Escape both commit the pending buffer.
            KeyCode::Enter | KeyCode::Esc => Action::CommitFilter,
            KeyCode::Backspace => {
                let mut text = self.filter_sort.pending.clone();
                text.pop();
                Action::UpdateFilter(text)
            }
            KeyCode::Char(c) => {
                let mut text = self.filter_sort.pending.clone();
                text.push(c);
                Action::UpdateFilter(text)
            }
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Resize(command) => self.layout.resize(command),
            Action::CycleSortMode => {
                self.filter_sort.sort_key = self.filter_sort.sort_key.next();
                self.refresh_derived();
            }
            Action::EnterFilterMode => {
                self.filter_sort.pending = self.filter_sort.filter.clone();
                self.input_mode = InputMode::Filtering;
                self.refresh_derived();
            }
            Action::CommitFilter => {
                self.filter_sort.commit_pending();
                self.input_mode = InputMode::Normal;
                self.refresh_derived();
            }
            Action::UpdateFilter(text) => {
                self.filter_sort.pending = text;
                // The list follows every keystroke, not just the commit.
                self.refresh_derived();
            }
            Action::SelectPrev => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            Action::SelectNext => {
                if self.selected_index + 1 < self.visible.len() {
                    self.selected_index += 1;
                }
            }
            Action::Terminate => self.terminate_selected(),
            Action::ReniceUp => self.renice_selected(1),
            Action::ReniceDown => self.renice_selected(-1),
            Action::PointerMove(x, y) => self.pointer_moved(x, y),
            Action::PointerClick(x, y) => {
                self.pointer_moved(x, y);
                self.select_at(x, y);
            }
            Action::None => {}
        }
    }

    /// Best-effort SIGTERM at the selected row. Failures are logged and
    /// otherwise invisible; the only feedback is the process disappearing
    /// (or not) on a later tick.
    fn terminate_selected(&mut self) {
        let Some(pid) = self.selected_pid() else {
            return;
        };
        if let Err(err) = self.control.send_terminate(pid) {
            warn!(pid, %err, "terminate failed");
        }
    }

    /// Reads the current niceness and requests it shifted by `delta`.
    /// Fire-and-forget like terminate.
    fn renice_selected(&mut self, delta: i32) {
        let Some(pid) = self.selected_pid() else {
            return;
        };
        match self.control.niceness(pid) {
            Ok(nice) => {
                if let Err(err) = self.control.set_niceness(pid, nice + delta) {
                    warn!(pid, %err, "renice failed");
                }
            }
            Err(err) => warn!(pid, %err, "could not read niceness"),
        }
    }

    fn pointer_moved(&mut self, x: u16, y: u16) {
        self.tooltip.x = x;
        self.tooltip.y = y;
        if self.config.general.show_tooltips {
            self.tooltip.region = self.layout.hit_test(x, y);
            self.tooltip.visible = self.tooltip.region.is_some();
        } else {
            self.tooltip.region = None;
            self.tooltip.visible = false;
        }
    }

    fn select_at(&mut self, x: u16, y: u16) {
        let Some(area) = self.process_table_area else {
            return;
        };
        if x < area.x || x >= area.x + area.width || y < area.y || y >= area.y + area.height {
            return;
        }
        let row = (y - area.y) as usize;
        if row < self.visible.len() {
            self.selected_index = row;
        }
    }

    /// Tooltip body for the hovered region. The GPU text folds in live
    /// health, temperature, fan, and error warnings from the snapshot.
    pub fn tooltip_content(&self, region: Region) -> String {
        match region {
            Region::Gpu => {
                let base = "GPU panel: utilization, memory, temperature, and health.";
                let gpu = &self.snapshot.gpu;
                if !gpu.available {
                    return base.to_string();
                }
                let mut text = format!("{base}\nHealth: {}", gpu.health.label());
                if gpu.temperature > 90 {
                    text.push_str(" | CRITICAL TEMPERATURE!");
                } else if gpu.temperature > 80 {
                    text.push_str(" | High temperature");
                }
                if gpu.temperature > 80 && gpu.fan_speed < 30 {
                    text.push_str(" | Low fan speed");
                }
                if gpu.error_count > 0 {
                    text.push_str(&format!(" | Errors: {}", gpu.error_count));
                }
                text
            }
            Region::Process => {
                "Process list: / filters, s cycles sort, k terminates, F7/F8 renice.".to_string()
            }
            Region::Cpu => "CPU panel: utilization, load averages, and per-core usage.".to_string(),
            Region::Footer => {
                "Footer: [ and ] resize the GPU column, { and } resize the process column."
                    .to_string()
            }
        }
    }
}
