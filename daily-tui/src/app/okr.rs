use tracing::warn;

use crate::store::StorageError;

use super::*;

impl App {
    pub fn open_new_objective(&mut self) {
        self.dialog = Some(Dialog::ObjectiveForm {
            objective_id: None,
            title: TextInput::new(),
        });
    }

    pub fn open_rename_selected_objective(&mut self) {
        let Some(objective) = self
            .selected_okr_row()
            .and_then(|row| self.okr.get(row.objective_id()))
        else {
            return;
        };
        self.dialog = Some(Dialog::ObjectiveForm {
            objective_id: Some(objective.id.clone()),
            title: TextInput::from_str(&objective.title),
        });
    }

    pub fn open_add_key_result(&mut self) {
        let Some(objective_id) = self.selected_okr_row().map(|r| r.objective_id().to_string())
        else {
            return;
        };
        self.dialog = Some(Dialog::KeyResultForm {
            objective_id,
            content: TextInput::new(),
        });
    }

    /// Ask before deleting the selected objective. Key results are deleted directly.
    pub fn delete_selected_okr_row(&mut self) {
        match self.selected_okr_row().cloned() {
            Some(OkrRow::Objective { objective_id }) => {
                let title = self
                    .okr
                    .get(&objective_id)
                    .map(|o| o.title.clone())
                    .unwrap_or_default();
                self.dialog = Some(Dialog::ConfirmDelete(DeleteTarget::Objective {
                    id: objective_id,
                    title,
                }));
            }
            Some(OkrRow::KeyResult {
                objective_id,
                kr_id,
            }) => {
                let result = self.okr.delete_key_result(&objective_id, &kr_id);
                self.report_okr_write("Delete key result", result);
            }
            None => {}
        }
    }

    pub fn toggle_selected_key_result(&mut self) {
        if let Some(OkrRow::KeyResult {
            objective_id,
            kr_id,
        }) = self.selected_okr_row().cloned()
        {
            let result = self.okr.toggle_key_result(&objective_id, &kr_id);
            self.report_okr_write("Update key result", result);
        }
    }

    /// Submit the objective dialog. A blank title keeps the dialog open and writes nothing.
    pub fn submit_objective_form(&mut self) {
        let Some(Dialog::ObjectiveForm {
            objective_id,
            title,
        }) = &self.dialog
        else {
            return;
        };
        if title.value.trim().is_empty() {
            return;
        }
        let title = title.value.clone();
        let result = match objective_id.clone() {
            Some(id) => self.okr.update_objective_title(&id, &title),
            None => self.okr.create_objective(&title).map(|id| id.is_some()),
        };
        self.dialog = None;
        self.report_okr_write("Save objective", result);
    }

    pub fn submit_key_result_form(&mut self) {
        let Some(Dialog::KeyResultForm {
            objective_id,
            content,
        }) = &self.dialog
        else {
            return;
        };
        if content.value.trim().is_empty() {
            return;
        }
        let (objective_id, content) = (objective_id.clone(), content.value.clone());
        let result = self
            .okr
            .add_key_result(&objective_id, &content)
            .map(|id| id.is_some());
        self.dialog = None;
        self.report_okr_write("Add key result", result);
    }

    pub fn confirm_delete_objective(&mut self, id: &str) {
        let result = self.okr.delete_objective(id);
        self.dialog = None;
        self.report_okr_write("Delete objective", result);
    }

    fn report_okr_write(&mut self, action: &str, result: Result<bool, StorageError>) {
        match result {
            Ok(_) => self.rebuild_okr_rows(),
            Err(e) => {
                warn!(error = %e, action, "OKR write failed");
                self.set_error(format!("{action} failed: {e}"));
            }
        }
    }
}
