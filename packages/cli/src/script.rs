//! Editing scripts: a JSON array of editor gestures replayed in order.
//!
//! ```json
//! [
//!   { "op": "addBlock", "blockType": "text" },
//!   { "op": "updateBlock", "id": "block-1", "fields": { "content": "<p>Hi</p>" } },
//!   { "op": "undo" }
//! ]
//! ```

use blockmail_editor::{BlockId, Direction, Editor, EditorError, SettingsPatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ScriptCommand {
    #[serde(rename_all = "camelCase")]
    AddBlock { block_type: String },
    UpdateBlock {
        id: BlockId,
        fields: serde_json::Value,
    },
    DeleteBlock { id: BlockId },
    DuplicateBlock { id: BlockId },
    MoveBlock { id: BlockId, direction: Direction },
    #[serde(rename_all = "camelCase")]
    MoveBlockToPosition {
        source_id: BlockId,
        target_id: BlockId,
    },
    UpdateSettings { settings: SettingsPatch },
    Undo,
    Redo,
    Click { id: BlockId },
    BeginReorder { id: BlockId },
    CompleteReorder { id: BlockId },
    CancelReorder,
    Save,
    Preview,
}

impl ScriptCommand {
    /// Run against `editor`, describing what happened
    pub fn run(&self, editor: &mut Editor) -> Result<String, EditorError> {
        match self {
            ScriptCommand::AddBlock { block_type } => {
                let id = editor.add_block(block_type)?;
                Ok(format!("added {} block {}", block_type, id))
            }
            ScriptCommand::UpdateBlock { id, fields } => {
                editor.update_block_json(id, fields.clone())?;
                Ok(format!("updated {}", id))
            }
            ScriptCommand::DeleteBlock { id } => {
                editor.delete_block(id)?;
                Ok(format!("deleted {}", id))
            }
            ScriptCommand::DuplicateBlock { id } => {
                let copy = editor.duplicate_block(id)?;
                Ok(format!("duplicated {} as {}", id, copy))
            }
            ScriptCommand::MoveBlock { id, direction } => {
                editor.move_block(id, *direction)?;
                Ok(format!("moved {} {}", id, direction))
            }
            ScriptCommand::MoveBlockToPosition { source_id, target_id } => {
                editor.move_block_to_position(source_id, target_id)?;
                Ok(format!("moved {} to {}", source_id, target_id))
            }
            ScriptCommand::UpdateSettings { settings } => {
                editor.update_settings(settings.clone())?;
                Ok("updated settings".to_string())
            }
            ScriptCommand::Undo => {
                let label = editor.undo_label().map(str::to_string);
                editor.undo()?;
                Ok(format!("undid {}", label.as_deref().unwrap_or("edit")))
            }
            ScriptCommand::Redo => {
                let label = editor.redo_label().map(str::to_string);
                editor.redo()?;
                Ok(format!("redid {}", label.as_deref().unwrap_or("edit")))
            }
            ScriptCommand::Click { id } => {
                editor.click_block(id)?;
                Ok(match editor.selected_block() {
                    Some(selected) => format!("selected {}", selected),
                    None => "cleared selection".to_string(),
                })
            }
            ScriptCommand::BeginReorder { id } => {
                editor.begin_reorder(id);
                Ok(format!("dragging {}", id))
            }
            ScriptCommand::CompleteReorder { id } => {
                if editor.complete_reorder(id)? {
                    Ok(format!("dropped onto {}", id))
                } else {
                    Ok("drop ignored".to_string())
                }
            }
            ScriptCommand::CancelReorder => {
                editor.cancel_reorder();
                Ok("drag cancelled".to_string())
            }
            ScriptCommand::Save => {
                editor.save();
                Ok("saved".to_string())
            }
            ScriptCommand::Preview => {
                editor.preview();
                Ok("previewed".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_editor::ErrorKind;

    fn parse(json: &str) -> Vec<ScriptCommand> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let script = parse(
            r#"[
                { "op": "addBlock", "blockType": "button" },
                { "op": "moveBlockToPosition", "sourceId": "a", "targetId": "b" },
                { "op": "updateSettings", "settings": { "fontSize": 18 } },
                { "op": "undo" },
                { "op": "cancelReorder" }
            ]"#,
        );

        assert_eq!(
            script[0],
            ScriptCommand::AddBlock {
                block_type: "button".to_string()
            }
        );
        assert_eq!(script[3], ScriptCommand::Undo);
        assert_eq!(script.len(), 5);
    }

    #[test]
    fn test_run_script() {
        let script = parse(
            r#"[
                { "op": "addBlock", "blockType": "text" },
                { "op": "updateBlock", "id": "block-1", "fields": { "content": "<p>Hi</p>" } },
                { "op": "addBlock", "blockType": "spacer" },
                { "op": "beginReorder", "id": "block-2" },
                { "op": "completeReorder", "id": "block-1" }
            ]"#,
        );

        let mut editor = Editor::new(None);
        for command in &script {
            command.run(&mut editor).unwrap();
        }

        let order: Vec<_> = editor.document().ids().map(|id| id.to_string()).collect();
        assert_eq!(order, vec!["block-2", "block-1"]);
    }

    #[test]
    fn test_run_reports_diagnostics() {
        let mut editor = Editor::new(None);

        let err = ScriptCommand::DeleteBlock { id: "nope".into() }
            .run(&mut editor)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = ScriptCommand::Redo.run(&mut editor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HistoryExhausted);
    }
}
