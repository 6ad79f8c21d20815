use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::text::{CCursor, LayoutJob};
use eframe::egui::text_edit::{CCursorRange, TextEditState};
use eframe::egui::{
    self, Align, FontDefinitions, Key, KeyboardShortcut, Layout, Modifiers, Pos2, Vec2,
    ViewportCommand,
};
use eframe::{App, Frame};
use rustpad_core::{
    build_menu, shortcut_bindings, BuiltMenu, Command, Notepad, NotepadError, PromptChoice,
    Selection, Toggle, WidgetFunction, WindowDimension,
};
use rustpad_settings::{theme_names, KeyChord, Theme, APP_NAME, MENU_LAYOUT};
use tracing::{debug, error};

use crate::host::GuiHost;
use crate::style;

const EDITOR_ID: &str = "rustpad_editor";

/// Load state of a theme font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontState {
    /// Handed to egui this frame; usable from the next one.
    Pending,
    Ready,
    Missing,
}

pub struct RustPadApp {
    notepad: Notepad,
    menus: Vec<BuiltMenu<Notepad>>,
    shortcuts: Vec<(KeyboardShortcut, Command<Notepad>)>,
    host: GuiHost,
    editor_text: String,
    synced_revision: Option<u64>,
    applied_theme: Option<Theme>,
    shown_title: String,
    theme_choice: String,
    error: Option<String>,
    fonts: FontDefinitions,
    font_states: BTreeMap<String, FontState>,
    placed: bool,
}

impl RustPadApp {
    pub fn new(host: GuiHost) -> Self {
        let notepad = Notepad::new();
        let menus = build_menu(
            MENU_LAYOUT,
            &Notepad::actions(),
            &Notepad::variable_bindings(),
        );
        let mut shortcuts: Vec<_> = shortcut_bindings(&menus)
            .into_iter()
            .filter_map(|(shortcut, command)| {
                keyboard_shortcut(shortcut.chord()).map(|keys| (keys, command.clone()))
            })
            .collect();
        // Ctrl+Shift+N must be tried before Ctrl+N.
        shortcuts.sort_by_key(|(keys, _)| !keys.modifiers.shift);
        let theme_choice = notepad.theme_name().to_string();
        Self {
            notepad,
            menus,
            shortcuts,
            host,
            editor_text: String::new(),
            synced_revision: None,
            applied_theme: None,
            shown_title: String::new(),
            theme_choice,
            error: None,
            fonts: FontDefinitions::default(),
            font_states: BTreeMap::new(),
            placed: false,
        }
    }

    fn modal_open(&self) -> bool {
        self.notepad.prompt().is_some()
            || self.notepad.is_theme_picker_open()
            || self.notepad.info().is_some()
            || self.error.is_some()
    }

    fn run(&mut self, command: &Command<Notepad>) {
        if let Err(err) = command.execute(&mut self.notepad, &mut self.host) {
            self.report(err);
        }
    }

    fn report(&mut self, err: NotepadError) {
        error!(%err, "action failed");
        self.error = Some(err.to_string());
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.modal_open() {
            return;
        }
        let mut triggered = BTreeSet::new();
        // The platform layer turns the clipboard keys into events of their own.
        ctx.input_mut(|input| {
            input.events.retain(|event| {
                let key = match event {
                    egui::Event::Cut => "edit_cut",
                    egui::Event::Copy => "edit_copy",
                    egui::Event::Paste(_) => "edit_paste",
                    _ => return true,
                };
                triggered.insert(key.to_string());
                false
            });
        });
        for (keys, command) in &self.shortcuts {
            if ctx.input_mut(|input| input.consume_shortcut(keys)) {
                triggered.insert(command.key().to_string());
            }
        }
        let commands: Vec<_> = self
            .shortcuts
            .iter()
            .map(|(_, command)| command)
            .filter(|command| triggered.contains(command.key()))
            .cloned()
            .collect();
        for command in commands {
            debug!(action = command.key(), "shortcut pressed");
            self.run(&command);
        }
    }

    fn choose_theme(&mut self, name: &str) {
        if let Err(err) = self.notepad.apply_theme(name) {
            self.report(err);
        }
        self.theme_choice = self.notepad.theme_name().to_string();
    }

    fn ensure_theme_font(&mut self, ctx: &egui::Context) {
        for state in self.font_states.values_mut() {
            if *state == FontState::Pending {
                *state = FontState::Ready;
            }
        }
        let Some(family) = self.notepad.theme().font_style.clone() else {
            return;
        };
        if self.font_states.contains_key(&family) {
            return;
        }
        let state = match style::load_font(&family) {
            Some(data) => {
                style::register_font(&mut self.fonts, &family, data);
                ctx.set_fonts(self.fonts.clone());
                FontState::Pending
            }
            None => {
                debug!(%family, "font not installed, using monospace");
                FontState::Missing
            }
        };
        self.font_states.insert(family, state);
    }

    fn font_ready(&self) -> bool {
        self.notepad
            .theme()
            .font_style
            .as_ref()
            .and_then(|family| self.font_states.get(family))
            == Some(&FontState::Ready)
    }

    fn place_window(&mut self, ctx: &egui::Context) {
        if self.placed {
            return;
        }
        let monitor = ctx.input(|input| input.viewport().monitor_size);
        if let Some(position) = initial_position(monitor) {
            ctx.send_viewport_cmd(ViewportCommand::OuterPosition(position));
            self.placed = true;
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme.as_ref() == Some(self.notepad.theme()) {
            return;
        }
        let theme = self.notepad.theme().clone();
        ctx.set_visuals(style::visuals(&theme));
        self.applied_theme = Some(theme);
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        if self.shown_title != self.notepad.title() {
            self.shown_title = self.notepad.title().to_string();
            ctx.send_viewport_cmd(ViewportCommand::Title(self.shown_title.clone()));
        }
    }

    fn handle_close(&mut self, ctx: &egui::Context) {
        if ctx.input(|input| input.viewport().close_requested()) && !self.notepad.request_close()
        {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
        }
        if self.notepad.is_close_requested() {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let enabled = !self.modal_open();
        let mut clicked = None;
        egui::TopBottomPanel::top("menu_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    egui::menu::bar(ui, |ui| {
                        for menu in &self.menus {
                            ui.menu_button(menu.label, |ui| {
                                for entry in &menu.entries {
                                    let args = &entry.args;
                                    match (entry.widget, args.variable) {
                                        (WidgetFunction::AddCheckbutton, Some(toggle)) => {
                                            let mut value = self.notepad.toggle(toggle);
                                            // The bound action flips the flag itself.
                                            if ui.checkbox(&mut value, &args.label).changed() {
                                                clicked = Some(args.command.clone());
                                                ui.close_menu();
                                            }
                                        }
                                        _ => {
                                            let mut button = egui::Button::new(&args.label);
                                            if let Some(accelerator) = &args.accelerator {
                                                button = button.shortcut_text(accelerator);
                                            }
                                            if ui.add(button).clicked() {
                                                clicked = Some(args.command.clone());
                                                ui.close_menu();
                                            }
                                        }
                                    }
                                }
                            });
                        }
                    });
                });
            });
        if let Some(command) = clicked {
            self.run(&command);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        if !self.notepad.toggle(Toggle::StatusBar) {
            return;
        }
        let status = self.notepad.status();
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;
                    ui.label(status.encoding);
                    ui.separator();
                    ui.label(status.platform);
                    ui.separator();
                    ui.label(status.zoom);
                    ui.separator();
                    ui.label(&status.location);
                });
            });
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        let id = egui::Id::new(EDITOR_ID);
        let revision = self.notepad.buffer().revision();
        if self.synced_revision != Some(revision) {
            self.editor_text = self.notepad.text().to_string();
            let selection = self.notepad.buffer().selection();
            let mut state = TextEditState::load(ctx, id).unwrap_or_default();
            state.set_ccursor_range(Some(CCursorRange::two(
                CCursor::new(selection.start()),
                CCursor::new(selection.end()),
            )));
            state.store(ctx, id);
            ctx.memory_mut(|memory| memory.request_focus(id));
            self.synced_revision = Some(revision);
        }

        let theme = self.notepad.theme();
        let font = style::editor_font(theme, self.font_ready());
        let color = style::foreground(theme);
        let fill = style::background(theme);
        let break_anywhere = !self.notepad.toggle(Toggle::WrapWords);
        let interactive = !self.modal_open();

        let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
            let mut job = LayoutJob::simple(text.to_owned(), font.clone(), color, wrap_width);
            job.wrap.break_anywhere = break_anywhere;
            ui.fonts(|fonts| fonts.layout_job(job))
        };

        let output = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(fill))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        egui::TextEdit::multiline(&mut self.editor_text)
                            .id(id)
                            .frame(false)
                            .interactive(interactive)
                            .desired_width(f32::INFINITY)
                            .desired_rows(1)
                            .lock_focus(true)
                            .layouter(&mut layouter)
                            .show(ui)
                    })
                    .inner
            })
            .inner;

        let selection = output
            .cursor_range
            .map(|range| {
                let range = range.as_ccursor_range();
                Selection::new(range.secondary.index, range.primary.index)
            })
            .unwrap_or_else(|| self.notepad.buffer().selection());
        if self.editor_text != self.notepad.text() {
            self.notepad.update_text(self.editor_text.clone(), selection);
        } else if selection != self.notepad.buffer().selection() {
            self.notepad.update_selection(selection);
        }
    }

    fn show_save_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.notepad.prompt() else {
            return;
        };
        let message = prompt.message();
        let mut choice = None;
        modal(APP_NAME).show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    choice = Some(PromptChoice::Save);
                }
                if ui.button("Don't Save").clicked() {
                    choice = Some(PromptChoice::DontSave);
                }
                if ui.button("Cancel").clicked() {
                    choice = Some(PromptChoice::Cancel);
                }
            });
        });
        if let Some(choice) = choice {
            if let Err(err) = self.notepad.resolve_prompt(choice, &mut self.host) {
                self.report(err);
            }
        }
    }

    fn show_theme_picker(&mut self, ctx: &egui::Context) {
        if !self.notepad.is_theme_picker_open() {
            return;
        }
        let mut picked = None;
        let mut confirmed = false;
        modal("Choose a theme").show(ctx, |ui| {
            for name in theme_names() {
                if ui
                    .radio_value(&mut self.theme_choice, name.to_string(), name)
                    .clicked()
                {
                    picked = Some(name);
                }
            }
            ui.add_space(8.0);
            confirmed = ui.button("OK").clicked();
        });
        // Every click applies, so the random theme re-rolls.
        if let Some(name) = picked {
            self.choose_theme(name);
        }
        if confirmed {
            self.notepad.close_theme_picker();
        }
    }

    fn show_info(&mut self, ctx: &egui::Context) {
        let Some(info) = self.notepad.info() else {
            return;
        };
        let (title, body) = (info.title.clone(), info.body.clone());
        let mut dismissed = false;
        modal(&title).show(ctx, |ui| {
            ui.label(body);
            ui.add_space(8.0);
            dismissed = ui.button("OK").clicked();
        });
        if dismissed {
            self.notepad.dismiss_info();
        }
    }

    fn show_error(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error.clone() else {
            return;
        };
        let mut dismissed = false;
        modal("Error").show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            dismissed = ui.button("OK").clicked();
        });
        if dismissed {
            self.error = None;
        }
    }
}

impl App for RustPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.place_window(ctx);
        self.ensure_theme_font(ctx);
        self.apply_theme_if_needed(ctx);
        self.handle_shortcuts(ctx);

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_editor(ctx);

        self.show_save_prompt(ctx);
        self.show_theme_picker(ctx);
        self.show_info(ctx);
        self.show_error(ctx);

        self.sync_title(ctx);
        self.handle_close(ctx);
    }
}

fn modal(title: &str) -> egui::Window<'static> {
    egui::Window::new(title.to_string())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Centers the default window once the monitor size is known.
fn initial_position(monitor: Option<Vec2>) -> Option<Pos2> {
    let monitor = monitor.filter(|size| size.x > 0.0 && size.y > 0.0)?;
    let [x, y] = WindowDimension::default().position(monitor.x as u32, monitor.y as u32);
    Some(egui::pos2(x, y))
}

fn letter_key(letter: char) -> Option<Key> {
    let key = match letter.to_ascii_lowercase() {
        'a' => Key::A,
        'b' => Key::B,
        'c' => Key::C,
        'd' => Key::D,
        'e' => Key::E,
        'f' => Key::F,
        'g' => Key::G,
        'h' => Key::H,
        'i' => Key::I,
        'j' => Key::J,
        'k' => Key::K,
        'l' => Key::L,
        'm' => Key::M,
        'n' => Key::N,
        'o' => Key::O,
        'p' => Key::P,
        'q' => Key::Q,
        'r' => Key::R,
        's' => Key::S,
        't' => Key::T,
        'u' => Key::U,
        'v' => Key::V,
        'w' => Key::W,
        'x' => Key::X,
        'y' => Key::Y,
        'z' => Key::Z,
        _ => return None,
    };
    Some(key)
}

/// Chords without a letter cannot be pressed on their own and are skipped.
fn keyboard_shortcut(chord: KeyChord) -> Option<KeyboardShortcut> {
    let key = letter_key(chord.letter?)?;
    let mut modifiers = Modifiers::NONE;
    if chord.ctrl {
        modifiers = modifiers | Modifiers::COMMAND;
    }
    if chord.shift {
        modifiers = modifiers | Modifiers::SHIFT;
    }
    Some(KeyboardShortcut::new(modifiers, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustpad_settings::SHORTCUTS;

    #[test]
    fn every_builtin_shortcut_maps_to_a_key_press() {
        for (key, shortcut) in SHORTCUTS.iter() {
            assert!(
                keyboard_shortcut(shortcut.chord()).is_some(),
                "{key} has no key press"
            );
        }
    }

    #[test]
    fn new_window_uses_shift() {
        assert_eq!(
            keyboard_shortcut(SHORTCUTS["file_new_window"].chord()),
            Some(KeyboardShortcut::new(
                Modifiers::COMMAND | Modifiers::SHIFT,
                Key::N
            ))
        );
        assert_eq!(
            keyboard_shortcut(SHORTCUTS["file_new"].chord()),
            Some(KeyboardShortcut::new(Modifiers::COMMAND, Key::N))
        );
    }

    #[test]
    fn shift_chords_are_tried_first() {
        let app = RustPadApp::new(GuiHost::new(Vec::new()));
        let first_plain = app
            .shortcuts
            .iter()
            .position(|(keys, _)| !keys.modifiers.shift)
            .unwrap();
        assert!(app.shortcuts[first_plain..]
            .iter()
            .all(|(keys, _)| !keys.modifiers.shift));
        assert_eq!(app.shortcuts.len(), SHORTCUTS.len());
    }

    #[test]
    fn window_is_centered_on_known_monitor() {
        assert_eq!(
            initial_position(Some(egui::vec2(1366.0, 768.0))),
            Some(egui::pos2(383.0, 184.0))
        );
        assert_eq!(initial_position(None), None);
        assert_eq!(initial_position(Some(Vec2::ZERO)), None);
    }

    #[test]
    fn picking_a_theme_applies_it_while_the_picker_stays_open() {
        let mut app = RustPadApp::new(GuiHost::new(Vec::new()));
        let mut host = GuiHost::new(Vec::new());
        app.notepad.format_theme(&mut host).unwrap();

        app.choose_theme("dark");
        assert_eq!(app.notepad.theme_name(), "dark");
        assert_eq!(app.theme_choice, "dark");
        assert!(app.notepad.is_theme_picker_open());

        app.choose_theme("no_such_theme");
        assert_eq!(app.notepad.theme_name(), "dark");
        assert_eq!(app.theme_choice, "dark");
        assert!(app.error.is_some());
    }

    #[test]
    fn fonts_wait_a_frame_before_use() {
        let mut app = RustPadApp::new(GuiHost::new(Vec::new()));
        app.choose_theme("dark");
        assert!(!app.font_ready());
        app.font_states
            .insert("Courier New".to_string(), FontState::Ready);
        assert!(app.font_ready());
        app.choose_theme("light");
        assert!(!app.font_ready());
    }
}
