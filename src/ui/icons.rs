pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const BOOK: &str = "📇";
    pub const DATABASE: &str = "🗄️";
    pub const GLOBE: &str = "🌍";
    pub const EMPTY: &str = "∅";
}
