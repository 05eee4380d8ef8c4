//! Curated starter selections.
//!
//! Hand-picked Lucide icons grouped by theme, used to seed a new pack.

/// One curated icon with a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedIcon {
    /// Compound identifier such as `lucide:globe`.
    pub id: &'static str,
    pub label: &'static str,
    pub category: &'static str,
}

const fn curated(id: &'static str, label: &'static str, category: &'static str) -> CuratedIcon {
    CuratedIcon { id, label, category }
}

pub static SYSTEM_APPS: &[CuratedIcon] = &[
    curated("lucide:globe", "Browser", "System"),
    curated("lucide:folder", "Folder", "System"),
    curated("lucide:file", "File", "System"),
    curated("lucide:settings", "Settings", "System"),
    curated("lucide:terminal", "Terminal", "System"),
    curated("lucide:code", "Code Editor", "System"),
    curated("lucide:music", "Music", "System"),
    curated("lucide:video", "Video", "System"),
    curated("lucide:image", "Image", "System"),
    curated("lucide:mail", "Mail", "System"),
    curated("lucide:calendar", "Calendar", "System"),
    curated("lucide:clock", "Clock", "System"),
    curated("lucide:calculator", "Calculator", "System"),
    curated("lucide:trash", "Trash", "System"),
    curated("lucide:download", "Download", "System"),
    curated("lucide:upload", "Upload", "System"),
    curated("lucide:search", "Search", "System"),
    curated("lucide:home", "Home", "System"),
    curated("lucide:monitor", "Monitor", "System"),
    curated("lucide:laptop", "Laptop", "System"),
];

pub static STREAMING_APPS: &[CuratedIcon] = &[
    curated("lucide:radio", "Radio", "Streaming"),
    curated("lucide:mic", "Microphone", "Streaming"),
    curated("lucide:video", "Video Camera", "Streaming"),
    curated("lucide:camera", "Camera", "Streaming"),
    curated("lucide:play", "Play", "Streaming"),
    curated("lucide:pause", "Pause", "Streaming"),
    curated("lucide:stop", "Stop", "Streaming"),
    curated("lucide:skip-forward", "Skip Forward", "Streaming"),
    curated("lucide:skip-back", "Skip Back", "Streaming"),
    curated("lucide:volume-2", "Volume", "Streaming"),
    curated("lucide:volume-x", "Mute", "Streaming"),
    curated("lucide:headphones", "Headphones", "Streaming"),
    curated("lucide:speaker", "Speaker", "Streaming"),
    curated("lucide:circle", "Live", "Streaming"),
    curated("lucide:users", "Viewers", "Streaming"),
    curated("lucide:heart", "Like", "Streaming"),
    curated("lucide:message-circle", "Chat", "Streaming"),
    curated("lucide:share", "Share", "Streaming"),
    curated("lucide:film", "Film", "Streaming"),
    curated("lucide:tv", "TV", "Streaming"),
];

pub static ACTION_ICONS: &[CuratedIcon] = &[
    curated("lucide:power", "Power", "Actions"),
    curated("lucide:refresh-cw", "Refresh", "Actions"),
    curated("lucide:rotate-cw", "Rotate", "Actions"),
    curated("lucide:zoom-in", "Zoom In", "Actions"),
    curated("lucide:zoom-out", "Zoom Out", "Actions"),
    curated("lucide:maximize", "Maximize", "Actions"),
    curated("lucide:minimize", "Minimize", "Actions"),
    curated("lucide:x", "Close", "Actions"),
    curated("lucide:check", "Check", "Actions"),
    curated("lucide:plus", "Add", "Actions"),
    curated("lucide:minus", "Remove", "Actions"),
    curated("lucide:edit", "Edit", "Actions"),
    curated("lucide:save", "Save", "Actions"),
    curated("lucide:copy", "Copy", "Actions"),
    curated("lucide:cut", "Cut", "Actions"),
    curated("lucide:clipboard", "Paste", "Actions"),
    curated("lucide:undo", "Undo", "Actions"),
    curated("lucide:redo", "Redo", "Actions"),
    curated("lucide:lock", "Lock", "Actions"),
    curated("lucide:unlock", "Unlock", "Actions"),
];

/// Every curated icon, in category order.
pub fn all() -> impl Iterator<Item = &'static CuratedIcon> {
    SYSTEM_APPS
        .iter()
        .chain(STREAMING_APPS)
        .chain(ACTION_ICONS)
}

/// Groups curated icons by category, keeping first-seen category order.
pub fn by_category() -> Vec<(&'static str, Vec<&'static CuratedIcon>)> {
    let mut groups: Vec<(&'static str, Vec<&'static CuratedIcon>)> = Vec::new();
    for icon in all() {
        match groups.iter_mut().find(|(category, _)| *category == icon.category) {
            Some((_, icons)) => icons.push(icon),
            None => groups.push((icon.category, vec![icon])),
        }
    }
    groups
}
