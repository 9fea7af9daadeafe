//! Conversation building from imported files.

use folio_core::{ConversationMessage, ProcessedFile};
use std::fmt::Write;

/// Turn an import result into the opening messages of a conversation.
///
/// The user message names the folder; the assistant message carries every
/// file as a fenced block labelled with its path, followed by the paths of
/// binary files that were left out.
pub fn build_context_from_files(
    files: &[ProcessedFile],
    binary_paths: &[String],
    root_name: &str,
) -> Vec<ConversationMessage> {
    let user = ConversationMessage::user(format!("Import the \"{}\" folder", root_name));

    let mut body = format!(
        "I've imported the contents of the \"{}\" folder ({} files).\n",
        root_name,
        files.len()
    );

    for file in files {
        let fence = fence_for(&file.content);
        let _ = write!(body, "\n{}{}\n{}", fence, file.path, file.content);
        if !file.content.ends_with('\n') {
            body.push('\n');
        }
        let _ = writeln!(body, "{}", fence);
    }

    if !binary_paths.is_empty() {
        body.push_str("\nSkipped binary files:\n");
        for path in binary_paths {
            let _ = writeln!(body, "- {}", path);
        }
    }

    vec![user, ConversationMessage::assistant(body)]
}

/// A backtick fence longer than any backtick run inside `content`.
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
