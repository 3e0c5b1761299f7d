//! End-to-end flows through the public engine surface: scripted snapshots
//! in, alert flags and rendered frames out.

use color_eyre::Result;
use frosttop::action::Action;
use frosttop::app::App;
use frosttop::config::ProfileConfiguration;
use frosttop::metrics::{MetricsProvider, ProcessRecord, Snapshot};
use frosttop::system::control::ProcessControl;
use frosttop::ui;
use frosttop::ui::theme::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

struct ScriptedProvider {
    snapshot: Snapshot,
}

impl MetricsProvider for ScriptedProvider {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn snapshot(&mut self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn shutdown(&mut self) {}
}

struct NoopControl;

impl ProcessControl for NoopControl {
    fn send_terminate(&mut self, _pid: u32) -> Result<()> {
        Ok(())
    }

    fn niceness(&mut self, _pid: u32) -> Result<i32> {
        Ok(0)
    }

    fn set_niceness(&mut self, _pid: u32, _value: i32) -> Result<()> {
        Ok(())
    }
}

fn record(pid: u32, user: &str, command: &str, cpu: f64, mem: f64) -> ProcessRecord {
    ProcessRecord {
        pid,
        user: user.to_string(),
        command: command.to_string(),
        state: "R".to_string(),
        cpu_percent: cpu,
        mem_percent: mem,
        threads: 1,
        priority: 0,
        gpu_user: false,
    }
}

fn app_with_snapshot(snapshot: Snapshot) -> App {
    let mut app = App::new(
        ProfileConfiguration::default(),
        Box::new(ScriptedProvider { snapshot }),
        Box::new(NoopControl),
    );
    app.on_tick();
    app
}

fn render(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buf = terminal.backend().buffer();

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn memory_pressure_raises_the_panel_alert() {
    let mut snapshot = Snapshot::default();
    snapshot.memory.used_percent = 96.0;
    snapshot.processes = vec![record(1, "root", "chrome", 1.0, 50.0)];

    let mut app = app_with_snapshot(snapshot);
    // Default threshold is 95%.
    assert!(app.alerts.mem);
    assert!(!app.alerts.cpu);

    // The process panel border renders in the alert color.
    let backend = TestBackend::new(120, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::draw(frame, &mut app)).unwrap();
    let buf = terminal.backend().buffer();
    let theme = Theme::lich_king();
    // col1 = floor(120 * 0.3) = 36: first border cell of the middle column.
    let border = buf.cell((36, 0)).unwrap();
    assert_eq!(border.style().fg, Some(theme.alert));
}

#[test]
fn filter_sort_and_render_pipeline() {
    let mut snapshot = Snapshot::default();
    snapshot.processes = vec![
        record(1234, "root", "chrome", 10.0, 1.0),
        record(12345, "jules", "cargo", 90.0, 2.0),
        record(42, "mysql", "mysqld", 50.0, 3.0),
    ];
    let mut app = app_with_snapshot(snapshot);

    // Default CPU sort puts the hottest process first.
    assert_eq!(app.visible[0].pid, 12345);

    // Filtering to the exact PID keeps only that row, live while typing.
    app.dispatch(Action::EnterFilterMode);
    app.dispatch(Action::UpdateFilter("1234".to_string()));
    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.visible[0].pid, 1234);
    app.dispatch(Action::CommitFilter);

    let out = render(&mut app, 120, 30);
    assert!(out.contains("1234"));
    assert!(!out.contains("12345"));
    assert!(out.contains("Filter: 1234"));
}

#[test]
fn resize_keys_move_the_column_boundary() {
    let mut snapshot = Snapshot::default();
    snapshot.processes = vec![record(1, "root", "chrome", 1.0, 1.0)];
    let mut app = app_with_snapshot(snapshot);
    app.on_resize(100, 20);

    let before = app.layout.geometry().unwrap();
    app.dispatch(Action::Resize(frosttop::layout::ResizeCommand::GrowLeft));
    let after = app.layout.geometry().unwrap();
    assert_eq!(after.col1, before.col1 + 5);
    assert_eq!(after.col2, before.col2);
}
