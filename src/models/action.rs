#[cfg(test)]
#[path = "action_test.rs"]
mod tests;

/// What the user asked the front end to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send the text and stream the answer.
    Send(String),
    /// Send the text and wait for the whole answer.
    Ask(String),
    Attach { paths: Vec<String>, text: String },

    NewConversation(Option<String>),
    ListConversations,
    SwitchConversation(String),        // Conversation ID
    RenameConversation(String),        // New title
    DeleteConversation(Option<String>), // Conversation ID, current when omitted
    ShowConversation,

    Help,
    Quit,
    Unknown(String),
}

impl Action {
    pub fn parse(line: &str) -> Option<Action> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let Some(command) = line.strip_prefix('/') else {
            return Some(Action::Send(line.to_string()));
        };

        let (name, rest) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let action = match name {
            "new" => Action::NewConversation(arg),
            "list" | "ls" => Action::ListConversations,
            "switch" => match arg {
                Some(id) => Action::SwitchConversation(id),
                None => Action::Unknown(line.to_string()),
            },
            "rename" => match arg {
                Some(title) => Action::RenameConversation(title),
                None => Action::Unknown(line.to_string()),
            },
            "delete" | "rm" => Action::DeleteConversation(arg),
            "show" => Action::ShowConversation,
            "ask" => match arg {
                Some(text) => Action::Ask(text),
                None => Action::Unknown(line.to_string()),
            },
            "attach" => parse_attach(rest).unwrap_or_else(|| Action::Unknown(line.to_string())),
            "help" | "?" => Action::Help,
            "quit" | "exit" | "q" => Action::Quit,
            _ => Action::Unknown(line.to_string()),
        };
        Some(action)
    }
}

// /attach <path> [<path>...] -- <text>
fn parse_attach(rest: &str) -> Option<Action> {
    let (paths, text) = match separator(rest) {
        Some(at) => (&rest[..at], rest[at + 2..].trim()),
        None => (rest, ""),
    };
    let paths = paths
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();
    if paths.is_empty() {
        return None;
    }
    Some(Action::Attach {
        paths,
        text: text.to_string(),
    })
}

// Position of the first `--` standing on its own, so file names like
// `my--notes.txt` stay whole.
fn separator(rest: &str) -> Option<usize> {
    rest.match_indices("--")
        .map(|(at, _)| at)
        .find(|&at| {
            let before = rest[..at].chars().next_back();
            let after = rest[at + 2..].chars().next();
            before.is_none_or(char::is_whitespace) && after.is_none_or(char::is_whitespace)
        })
}
