//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use adbt_app::{AppState, Screen, ScreenId};

use crate::layout;
use crate::theme::{icons::IconSet, palette};
use crate::widgets::screens::{
    AppsView, DashboardView, DeviceInfoView, DevicesView, FilesView, LogcatView, MonitorView,
    NoDevice,
};
use crate::widgets::{ConfirmDialog, FormDialog, HelpBar, Hints, MainHeader, ToastView};

/// Help bar for the no-device body of a device-bound screen
const NO_DEVICE_HINTS: Hints = &[("esc", "back"), ("q", "quit")];

/// Key hints for the active screen
pub fn hints(state: &AppState) -> Hints {
    if state.active_screen().requires_device() && !state.ctx.has_device() {
        return NO_DEVICE_HINTS;
    }
    match &state.screen {
        Screen::Dashboard(_) => DashboardView::HINTS,
        Screen::Devices(_) => DevicesView::HINTS,
        Screen::Apps(s) => AppsView::hints(s),
        Screen::Files(_) => FilesView::HINTS,
        Screen::Logcat(s) => LogcatView::hints(s),
        Screen::DeviceInfo(_) => DeviceInfoView::HINTS,
        Screen::Monitor(_) => MonitorView::HINTS,
    }
}

/// Render the complete UI (View function in TEA)
///
/// Pure: reads the state, including the viewport registry, and never
/// mutates it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    let icons = IconSet::new(state.ctx.settings.ui.icons);
    let ctx = &state.ctx;

    let header = MainHeader::new(state.active_screen(), icons)
        .with_device(ctx.selected_device.as_ref());
    frame.render_widget(header, areas.header);

    let mut help_suffix = None;
    match (&state.screen, ctx.selected_device.as_ref()) {
        (Screen::Dashboard(s), _) => {
            frame.render_widget(DashboardView::new(s, ctx, icons), areas.body)
        }
        (Screen::Devices(s), _) => frame.render_widget(DevicesView::new(s, ctx, icons), areas.body),
        (_, None) => frame.render_widget(NoDevice, areas.body),
        (Screen::Apps(s), Some(_)) => frame.render_widget(AppsView::new(s, icons), areas.body),
        (Screen::Files(s), Some(_)) => frame.render_widget(FilesView::new(s, icons), areas.body),
        (Screen::Logcat(s), Some(_)) => {
            let scroll = ctx.viewport(ScreenId::Logcat);
            let height = LogcatView::window_height(areas.body);
            help_suffix = LogcatView::scroll_percent(s, scroll, height);
            frame.render_widget(LogcatView::new(s, scroll), areas.body);
        }
        (Screen::DeviceInfo(s), Some(device)) => {
            frame.render_widget(DeviceInfoView::new(s, device), areas.body)
        }
        (Screen::Monitor(s), Some(_)) => {
            frame.render_widget(MonitorView::new(s, icons), areas.body)
        }
    }

    frame.render_widget(HelpBar::new(hints(state)).suffix(help_suffix), areas.footer);

    // Overlays draw over everything but the toast
    match &state.screen {
        Screen::Apps(s) if s.confirm.is_visible() => {
            frame.render_widget(ConfirmDialog::new(&s.confirm), area)
        }
        Screen::Files(s) if s.confirm.is_visible() => {
            frame.render_widget(ConfirmDialog::new(&s.confirm), area)
        }
        Screen::DeviceInfo(s) if s.confirm.is_visible() => {
            frame.render_widget(ConfirmDialog::new(&s.confirm), area)
        }
        Screen::Devices(s) if s.form.is_visible() => {
            frame.render_widget(FormDialog::new(&s.form), area)
        }
        _ => {}
    }

    frame.render_widget(ToastView::new(state.screen.toast(), icons), areas.body);
}
