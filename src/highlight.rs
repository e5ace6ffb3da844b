use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    fn colors_off(&self) -> bool {
        matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors the command word cyan and option-looking arguments yellow;
    /// everything else is left alone.
    pub fn highlight_command(&self, input: &str) -> String {
        if self.colors_off() || input.trim().is_empty() {
            return input.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        let flag_style = Style::builder().foreground(Color::Yellow).build();

        let mut styled = Vec::new();
        for (i, word) in input.split_whitespace().enumerate() {
            if i == 0 {
                styled.push(word.to_string().style(command_style).to_string());
            } else if word.starts_with('-') {
                styled.push(word.to_string().style(flag_style).to_string());
            } else {
                styled.push(word.to_string());
            }
        }

        styled.join(" ")
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if self.colors_off() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.to_string().style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if self.colors_off() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.to_string().style(hint_style).to_string()
    }
}
