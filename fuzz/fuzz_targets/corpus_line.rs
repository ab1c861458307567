use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(text) = std::str::from_utf8(data) {
                if let Ok(wv) = codenames::corpus::parse_line(text, 3, 1) {
                    assert_eq!(wv.components.len(), 3);
                    assert!(!wv.word.is_empty());
                }
            }
        });
    }
}
