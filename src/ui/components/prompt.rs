//! Prompt preview and output renderer.

use crate::domain::prompt::PreviewKind;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PromptViewModel;

const fn preview_label(kind: PreviewKind) -> &'static str {
    match kind {
        PreviewKind::Base => "base",
        PreviewKind::Additional => "additional",
        PreviewKind::Camera => "camera",
        PreviewKind::Style => "style",
        PreviewKind::Ratio => "ratio",
        PreviewKind::Params => "params",
    }
}

/// Appends one labelled line per preview block, then the generated prompt.
pub fn render_prompt(out: &mut String, vm: &PromptViewModel, theme: &Theme) {
    for block in &vm.preview {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&format!("{:<11}", preview_label(block.kind)));
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.accent));
        out.push_str(&block.text);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    match &vm.output {
        Some(output) => {
            out.push('\n');
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.text_normal));
            out.push_str(output);
            out.push_str(Theme::reset());
            out.push('\n');
        }
        None => {
            out.push_str(Theme::dim());
            out.push_str("Your generated prompt will appear here...");
            out.push_str(Theme::reset());
            out.push('\n');
        }
    }
}
