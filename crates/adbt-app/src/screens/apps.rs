//! App manager: list, filter, search and act on installed packages

use adbt_bridge::{AppAction, AppPackage};
use adbt_core::prelude::*;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::{Completion, Message};
use crate::overlay::{ConfirmOutcome, ConfirmPrompt, SearchInput};
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

use super::{clamp_cursor, notify, step_cursor, ScreenController};

/// Which packages are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppFilter {
    #[default]
    All,
    User,
    System,
}

impl AppFilter {
    pub fn next(self) -> Self {
        match self {
            AppFilter::All => AppFilter::User,
            AppFilter::User => AppFilter::System,
            AppFilter::System => AppFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppFilter::All => "All",
            AppFilter::User => "User",
            AppFilter::System => "System",
        }
    }

    pub fn matches(&self, app: &AppPackage) -> bool {
        match self {
            AppFilter::All => true,
            AppFilter::User => !app.is_system,
            AppFilter::System => app.is_system,
        }
    }
}

#[derive(Debug, Default)]
pub struct AppsScreen {
    pub apps: Vec<AppPackage>,
    pub cursor: usize,
    pub loading: bool,
    pub filter: AppFilter,
    pub search: SearchInput,
    pub confirm: ConfirmPrompt,
    pub toast: Toast,
    /// Action waiting on the confirmation prompt
    pending: Option<(String, AppAction)>,
}

impl AppsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages after the filter and search projections
    pub fn visible_apps(&self) -> Vec<&AppPackage> {
        self.apps
            .iter()
            .filter(|app| self.filter.matches(app) && self.search.matches(&app.package))
            .collect()
    }

    pub fn selected_app(&self) -> Option<&AppPackage> {
        self.visible_apps().get(self.cursor).copied()
    }

    fn reset_cursor(&mut self, ctx: &mut AppContext) {
        self.cursor = 0;
        ctx.viewport_mut(ScreenId::Apps).to_top();
    }

    fn reload(&mut self, ctx: &mut AppContext) -> Option<Command> {
        let serial = ctx.serial()?.to_string();
        self.loading = true;
        Some(Command::ListApps { serial })
    }

    fn request(&mut self, ctx: &mut AppContext, action: AppAction) -> UpdateResult {
        let Some((package, is_system)) = self
            .selected_app()
            .map(|app| (app.package.clone(), app.is_system))
        else {
            return UpdateResult::none();
        };

        if action == AppAction::Uninstall && is_system {
            return UpdateResult::command(notify(
                &mut self.toast,
                ctx,
                "Cannot uninstall system app",
                true,
            ));
        }

        if action.is_destructive() && ctx.settings.behavior.confirm_destructive {
            self.confirm.show(format!("{}:\n{}", action.label(), package));
            self.pending = Some((package, action));
            return UpdateResult::none();
        }

        UpdateResult::maybe(self.run(ctx, package, action))
    }

    fn run(&self, ctx: &AppContext, package: String, action: AppAction) -> Option<Command> {
        let serial = ctx.serial()?.to_string();
        Some(Command::AppAction {
            serial,
            package,
            action,
        })
    }
}

impl ScreenController for AppsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Apps
    }

    fn init(&mut self, ctx: &mut AppContext) -> Option<Command> {
        ctx.viewport_mut(ScreenId::Apps).to_top();
        self.reload(ctx)
    }

    fn handle_key(&mut self, ctx: &mut AppContext, key: InputKey) -> Option<UpdateResult> {
        if self.confirm.is_visible() {
            let result = match self.confirm.handle_key(key) {
                Some(outcome) => UpdateResult::message(Message::Confirm(outcome)),
                None => UpdateResult::none(),
            };
            return Some(result);
        }

        if self.search.is_active() {
            if self.search.handle_key(key) {
                self.reset_cursor(ctx);
            }
            return Some(UpdateResult::none());
        }

        if !ctx.has_device() {
            return None;
        }

        let result = match key {
            k if k.is_up() || k.is_down() => {
                self.cursor = step_cursor(self.cursor, k, self.visible_apps().len());
                let height = ctx.body_height();
                ctx.viewport_mut(ScreenId::Apps).ensure_visible(self.cursor, height);
                UpdateResult::none()
            }
            InputKey::Enter | InputKey::Char('l') => self.request(ctx, AppAction::Launch),
            InputKey::Char('s') => self.request(ctx, AppAction::ForceStop),
            InputKey::Char('u') => self.request(ctx, AppAction::Uninstall),
            InputKey::Char('x') => self.request(ctx, AppAction::ClearData),
            InputKey::Char('/') => {
                self.search.start();
                UpdateResult::none()
            }
            InputKey::Char('f') => {
                self.filter = self.filter.next();
                self.reset_cursor(ctx);
                UpdateResult::none()
            }
            InputKey::Char('r') => {
                self.reset_cursor(ctx);
                UpdateResult::maybe(self.reload(ctx))
            }
            InputKey::Esc if !self.search.query().is_empty() => {
                self.search.clear();
                self.reset_cursor(ctx);
                UpdateResult::none()
            }
            _ => return None,
        };
        Some(result)
    }

    fn handle_confirm(&mut self, ctx: &mut AppContext, outcome: ConfirmOutcome) -> UpdateResult {
        self.confirm.hide();
        match (outcome, self.pending.take()) {
            (ConfirmOutcome::Yes, Some((package, action))) => {
                UpdateResult::maybe(self.run(ctx, package, action))
            }
            _ => UpdateResult::none(),
        }
    }

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::AppsLoaded(Ok(apps)) => {
                self.loading = false;
                self.apps = apps;
                self.cursor = clamp_cursor(self.cursor, self.visible_apps().len());
                UpdateResult::none()
            }
            Completion::AppsLoaded(Err(e)) => {
                self.loading = false;
                warn!("Listing packages failed: {}", e);
                let text = format!("Failed to load apps: {}", e);
                UpdateResult::command(notify(&mut self.toast, ctx, text, true))
            }
            Completion::AppActionFinished { action, result } => match result {
                Ok(()) => {
                    let text = format!("{} successful", action.label());
                    let toast = notify(&mut self.toast, ctx, text, false);
                    let reload = if action == AppAction::Uninstall {
                        self.reload(ctx)
                    } else {
                        None
                    };
                    UpdateResult::maybe(Command::batch([Some(toast), reload]))
                }
                Err(e) => {
                    let text = format!("{} failed: {}", action.label(), e);
                    UpdateResult::command(notify(&mut self.toast, ctx, text, true))
                }
            },
            _ => UpdateResult::none(),
        }
    }

    fn captures_text(&self) -> bool {
        self.search.is_active()
    }

    fn toast(&self) -> &Toast {
        &self.toast
    }

    fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }
}
