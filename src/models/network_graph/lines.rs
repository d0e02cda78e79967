use super::NetworkGraph;
use crate::constants::DEFAULT_LINE_COLOR;
use crate::models::Line;

/// Extension trait for line-related operations on `NetworkGraph`
pub trait Lines {
    /// Insert a line, replacing any existing line with the same id
    fn add_line(&mut self, line: Line);

    fn line(&self, id: &str) -> Option<&Line>;

    /// All lines in insertion order
    fn lines(&self) -> impl Iterator<Item = &Line>;

    /// Display color of a line, falling back to `DEFAULT_LINE_COLOR` for unknown ids
    fn line_color(&self, id: &str) -> &str;
}

impl Lines for NetworkGraph {
    fn add_line(&mut self, line: Line) {
        self.lines.insert(line.id.clone(), line);
    }

    fn line(&self, id: &str) -> Option<&Line> {
        self.lines.get(id)
    }

    fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    fn line_color(&self, id: &str) -> &str {
        self.lines
            .get(id)
            .map_or(DEFAULT_LINE_COLOR, |line| line.color.as_str())
    }
}
