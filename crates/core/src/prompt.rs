use tracing::debug;

/// 觸發儲存提示的動作。 / Action that asked whether unsaved changes should be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    NewFile,
    Exit,
}

/// 使用者在提示中的選擇。 / The button the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Save,
    DontSave,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Prompting,
    Cancelled,
    SavedThenProceed,
    DiscardedThenProceed,
}

impl PromptState {
    pub fn is_terminal(self) -> bool {
        self != PromptState::Prompting
    }
}

/// 「是否儲存變更？」對話的狀態機。 / Modal "save changes?" question guarding a pending action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePrompt {
    pending: PendingAction,
    document_name: String,
    state: PromptState,
}

impl SavePrompt {
    pub fn new(pending: PendingAction, document_name: impl Into<String>) -> Self {
        Self {
            pending,
            document_name: document_name.into(),
            state: PromptState::Prompting,
        }
    }

    pub fn pending(&self) -> PendingAction {
        self.pending
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// 提示文字。 / Question shown to the user.
    pub fn message(&self) -> String {
        format!(
            "Would you like to save changes to \"{}\"?",
            self.document_name
        )
    }

    /// 離開 `Prompting`；結束後忽略後續選擇。 / Moves out of `Prompting`; once terminal, further choices are ignored.
    pub fn respond(&mut self, choice: PromptChoice) -> PromptState {
        if self.state.is_terminal() {
            return self.state;
        }
        debug!(?choice, pending = ?self.pending, "save prompt answered");
        self.state = match choice {
            PromptChoice::Save => PromptState::SavedThenProceed,
            PromptChoice::DontSave => PromptState::DiscardedThenProceed,
            PromptChoice::Cancel => PromptState::Cancelled,
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_prompting() {
        let prompt = SavePrompt::new(PendingAction::Exit, "Untitled");
        assert_eq!(prompt.state(), PromptState::Prompting);
        assert_eq!(
            prompt.message(),
            "Would you like to save changes to \"Untitled\"?"
        );
    }

    #[test]
    fn each_choice_reaches_its_terminal_state() {
        let cases = [
            (PromptChoice::Save, PromptState::SavedThenProceed),
            (PromptChoice::DontSave, PromptState::DiscardedThenProceed),
            (PromptChoice::Cancel, PromptState::Cancelled),
        ];
        for (choice, expected) in cases {
            let mut prompt = SavePrompt::new(PendingAction::NewFile, "notes.txt");
            assert_eq!(prompt.respond(choice), expected);
            assert!(prompt.state().is_terminal());
        }
    }

    #[test]
    fn terminal_state_is_sticky() {
        let mut prompt = SavePrompt::new(PendingAction::NewFile, "notes.txt");
        prompt.respond(PromptChoice::Cancel);
        assert_eq!(prompt.respond(PromptChoice::Save), PromptState::Cancelled);
    }
}
