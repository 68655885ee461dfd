//! Remote file browser

use adbt_bridge::{parent_path, FileEntry};
use adbt_core::prelude::*;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::{Completion, FileAction, Message};
use crate::overlay::{ConfirmOutcome, ConfirmPrompt};
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

use super::{clamp_cursor, notify, step_cursor, ScreenController};

#[derive(Debug, Default)]
pub struct FilesScreen {
    /// Directory currently listed
    pub path: String,
    pub entries: Vec<FileEntry>,
    pub cursor: usize,
    pub loading: bool,
    pub confirm: ConfirmPrompt,
    pub toast: Toast,
    /// Remote path waiting on the delete confirmation
    pending_delete: Option<String>,
}

impl FilesScreen {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            path: ctx.settings.files.start_path.clone(),
            ..Default::default()
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    fn list(&mut self, ctx: &AppContext) -> Option<Command> {
        let serial = ctx.serial()?.to_string();
        self.loading = true;
        Some(Command::ListFiles {
            serial,
            path: self.path.clone(),
        })
    }

    fn navigate(&mut self, ctx: &mut AppContext, path: String) -> UpdateResult {
        self.path = path;
        self.cursor = 0;
        ctx.viewport_mut(ScreenId::Files).to_top();
        UpdateResult::maybe(self.list(ctx))
    }

    fn delete(&self, ctx: &AppContext, path: String) -> Option<Command> {
        let serial = ctx.serial()?.to_string();
        Some(Command::DeletePath { serial, path })
    }

    fn request_delete(&mut self, ctx: &mut AppContext) -> UpdateResult {
        let Some(entry) = self.selected_entry().cloned() else {
            return UpdateResult::none();
        };
        if ctx.settings.behavior.confirm_destructive {
            self.confirm.show(format!("Delete file:\n{}", entry.name));
            self.pending_delete = Some(entry.path);
            return UpdateResult::none();
        }
        UpdateResult::maybe(self.delete(ctx, entry.path))
    }

    fn pull(&mut self, ctx: &mut AppContext) -> UpdateResult {
        let Some(entry) = self.selected_entry().cloned() else {
            return UpdateResult::none();
        };
        if entry.is_dir {
            return UpdateResult::command(notify(
                &mut self.toast,
                ctx,
                "Cannot pull a directory",
                true,
            ));
        }
        let Some(serial) = ctx.serial().map(str::to_string) else {
            return UpdateResult::none();
        };

        let local = ctx.settings.files.pull_directory().join(&entry.name);
        let text = format!("Pulling {}...", entry.name);
        let toast = notify(&mut self.toast, ctx, text, false);
        UpdateResult::maybe(Command::batch([
            Some(toast),
            Some(Command::PullFile {
                serial,
                remote: entry.path,
                local,
            }),
        ]))
    }
}

impl ScreenController for FilesScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Files
    }

    fn init(&mut self, ctx: &mut AppContext) -> Option<Command> {
        ctx.viewport_mut(ScreenId::Files).to_top();
        self.list(ctx)
    }

    fn handle_key(&mut self, ctx: &mut AppContext, key: InputKey) -> Option<UpdateResult> {
        if self.confirm.is_visible() {
            let result = match self.confirm.handle_key(key) {
                Some(outcome) => UpdateResult::message(Message::Confirm(outcome)),
                None => UpdateResult::none(),
            };
            return Some(result);
        }

        if !ctx.has_device() {
            return None;
        }

        let result = match key {
            k if k.is_up() || k.is_down() => {
                self.cursor = step_cursor(self.cursor, k, self.entries.len());
                let height = ctx.body_height();
                ctx.viewport_mut(ScreenId::Files).ensure_visible(self.cursor, height);
                UpdateResult::none()
            }
            InputKey::Enter => match self.selected_entry() {
                Some(entry) if entry.is_dir => {
                    let path = entry.path.clone();
                    self.navigate(ctx, path)
                }
                _ => UpdateResult::none(),
            },
            InputKey::Backspace | InputKey::Char('h') => {
                let parent = parent_path(&self.path);
                if parent == self.path {
                    UpdateResult::none()
                } else {
                    self.navigate(ctx, parent)
                }
            }
            InputKey::Char('d') => self.request_delete(ctx),
            InputKey::Char('p') => self.pull(ctx),
            InputKey::Char('r') => {
                let path = self.path.clone();
                self.navigate(ctx, path)
            }
            _ => return None,
        };
        Some(result)
    }

    fn handle_confirm(&mut self, ctx: &mut AppContext, outcome: ConfirmOutcome) -> UpdateResult {
        self.confirm.hide();
        match (outcome, self.pending_delete.take()) {
            (ConfirmOutcome::Yes, Some(path)) => UpdateResult::maybe(self.delete(ctx, path)),
            _ => UpdateResult::none(),
        }
    }

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::FilesLoaded { path, .. } if path != self.path => {
                debug!("Ignoring listing of {} (now at {})", path, self.path);
                UpdateResult::none()
            }
            Completion::FilesLoaded {
                result: Ok(entries),
                ..
            } => {
                self.loading = false;
                self.entries = entries;
                self.cursor = clamp_cursor(self.cursor, self.entries.len());
                UpdateResult::none()
            }
            Completion::FilesLoaded { result: Err(e), .. } => {
                self.loading = false;
                warn!("Listing {} failed: {}", self.path, e);
                let text = format!("Failed to load files: {}", e);
                UpdateResult::command(notify(&mut self.toast, ctx, text, true))
            }
            Completion::FileActionFinished { action, result } => match result {
                Ok(()) => {
                    let text = format!("{} successful", action.label());
                    let toast = notify(&mut self.toast, ctx, text, false);
                    let relist = match action {
                        FileAction::Delete => self.list(ctx),
                        FileAction::Pull => None,
                    };
                    UpdateResult::maybe(Command::batch([Some(toast), relist]))
                }
                Err(e) => {
                    let text = format!("{} failed: {}", action.label(), e);
                    UpdateResult::command(notify(&mut self.toast, ctx, text, true))
                }
            },
            _ => UpdateResult::none(),
        }
    }

    fn toast(&self) -> &Toast {
        &self.toast
    }

    fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbt_bridge::test_utils::test_device;

    fn entry(name: &str, is_dir: bool) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: format!("/sdcard/{}", name),
            is_dir,
            size: if is_dir { String::new() } else { "1024".into() },
            permissions: if is_dir { "drwxrwx--x" } else { "-rw-rw----" }.into(),
        }
    }

    fn files_screen(ctx: &mut AppContext) -> FilesScreen {
        ctx.select_device(test_device("abc", "Pixel"));
        let mut screen = FilesScreen::new(ctx);
        screen.init(ctx);
        screen.handle_completion(
            ctx,
            Completion::FilesLoaded {
                path: "/sdcard".into(),
                result: Ok(vec![entry("DCIM", true), entry("notes.txt", false)]),
            },
        );
        screen
    }

    fn leaves(result: UpdateResult) -> Vec<Command> {
        result.command.map(Command::into_leaves).unwrap_or_default()
    }

    #[test]
    fn test_starts_at_configured_path() {
        let mut ctx = AppContext::default();
        ctx.settings.files.start_path = "/data/local/tmp".into();
        ctx.select_device(test_device("abc", "Pixel"));
        let mut screen = FilesScreen::new(&ctx);
        assert!(matches!(
            screen.init(&mut ctx),
            Some(Command::ListFiles { path, .. }) if path == "/data/local/tmp"
        ));
    }

    #[test]
    fn test_no_device_issues_nothing() {
        let mut ctx = AppContext::default();
        let mut screen = FilesScreen::new(&ctx);
        assert!(screen.init(&mut ctx).is_none());
        assert!(screen.handle_key(&mut ctx, InputKey::Char('r')).is_none());
    }

    #[test]
    fn test_enter_directory_and_back() {
        let mut ctx = AppContext::default();
        let mut screen = files_screen(&mut ctx);

        let result = screen.handle_key(&mut ctx, InputKey::Enter).unwrap();
        assert_eq!(screen.path, "/sdcard/DCIM");
        assert!(matches!(
            result.command,
            Some(Command::ListFiles { ref path, .. }) if path == "/sdcard/DCIM"
        ));

        screen.handle_key(&mut ctx, InputKey::Backspace);
        assert_eq!(screen.path, "/sdcard");
    }

    #[test]
    fn test_enter_on_file_does_nothing() {
        let mut ctx = AppContext::default();
        let mut screen = files_screen(&mut ctx);
        screen.handle_key(&mut ctx, InputKey::Down);
        let result = screen.handle_key(&mut ctx, InputKey::Enter).unwrap();
        assert!(result.command.is_none());
        assert_eq!(screen.path, "/sdcard");
    }

    #[test]
    fn test_stale_listing_ignored() {
        let mut ctx = AppContext::default();
        let mut screen = files_screen(&mut ctx);
        screen.handle_key(&mut ctx, InputKey::Enter);

        screen.handle_completion(
            &mut ctx,
            Completion::FilesLoaded {
                path: "/sdcard".into(),
                result: Ok(vec![]),
            },
        );
        assert_eq!(screen.entries.len(), 2);
    }

    #[test]
    fn test_delete_confirmed_then_relisted_once() {
        let mut ctx = AppContext::default();
        let mut screen = files_screen(&mut ctx);
        screen.handle_key(&mut ctx, InputKey::Down);

        screen.handle_key(&mut ctx, InputKey::Char('d'));
        assert_eq!(screen.confirm.message(), "Delete file:\nnotes.txt");

        let deletes = leaves(screen.handle_confirm(&mut ctx, ConfirmOutcome::Yes));
        assert_eq!(deletes.len(), 1);
        assert!(matches!(
            &deletes[0],
            Command::DeletePath { path, .. } if path == "/sdcard/notes.txt"
        ));

        let after = leaves(screen.handle_completion(
            &mut ctx,
            Completion::FileActionFinished {
                action: FileAction::Delete,
                result: Ok(()),
            },
        ));
        let relists = after
            .iter()
            .filter(|c| matches!(c, Command::ListFiles { .. }))
            .count();
        assert_eq!(relists, 1);
    }

    #[test]
    fn test_pull_directory_refused() {
        let mut ctx = AppContext::default();
        let mut screen = files_screen(&mut ctx);
        let commands = leaves(screen.handle_key(&mut ctx, InputKey::Char('p')).unwrap());
        assert_eq!(screen.toast.text(), "Cannot pull a directory");
        assert!(!commands.iter().any(|c| matches!(c, Command::PullFile { .. })));
    }

    #[test]
    fn test_pull_file_targets_pull_dir() {
        let mut ctx = AppContext::default();
        ctx.settings.files.pull_dir = "/tmp/pulls".into();
        let mut screen = files_screen(&mut ctx);
        screen.handle_key(&mut ctx, InputKey::Down);

        let commands = leaves(screen.handle_key(&mut ctx, InputKey::Char('p')).unwrap());

        assert_eq!(screen.toast.text(), "Pulling notes.txt...");
        assert!(commands.iter().any(|c| matches!(
            c,
            Command::PullFile { remote, local, .. }
                if remote == "/sdcard/notes.txt"
                    && local == &std::path::PathBuf::from("/tmp/pulls/notes.txt")
        )));
    }

    #[test]
    fn test_pull_success_does_not_relist() {
        let mut ctx = AppContext::default();
        let mut screen = files_screen(&mut ctx);
        let commands = leaves(screen.handle_completion(
            &mut ctx,
            Completion::FileActionFinished {
                action: FileAction::Pull,
                result: Ok(()),
            },
        ));
        assert_eq!(screen.toast.text(), "Pull successful");
        assert!(!commands.iter().any(|c| matches!(c, Command::ListFiles { .. })));
    }
}
