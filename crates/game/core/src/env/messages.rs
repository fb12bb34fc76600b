/// Receives narration produced while commands resolve.
///
/// Stacking and formatting are the sink's concern.
pub trait MessageSink {
    fn add_message(&mut self, text: &str);
}

impl MessageSink for Vec<String> {
    fn add_message(&mut self, text: &str) {
        self.push(text.to_owned());
    }
}
