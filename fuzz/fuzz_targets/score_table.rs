use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(store) = codenames::ScoreStore::from_reader(data) {
                for row in store.rows() {
                    let _ = store.nearest(row, 3);
                }
            }
        });
    }
}
