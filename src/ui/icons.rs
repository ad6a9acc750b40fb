pub struct Icons;

impl Icons {
    pub const BOOKS: &str = "📚";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const STATS: &str = "📊";
    pub const LINK: &str = "🔗";
    pub const BRAIN: &str = "🧠";
    pub const FILE: &str = "📄";
    pub const NEW: &str = "✨";
    pub const DEL: &str = "🗑️";
    pub const PENCIL: &str = "📝";
    pub const TAG: &str = "🏷️";
    pub const GRAPH: &str = "🕸️";
    pub const EMPTY: &str = "∅";
}
