use super::open_store;

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("this deletes the profile, all sessions, and the journal; pass --yes to confirm".into());
    }
    let store = open_store()?;
    store.clear_all();
    println!("all data cleared");
    Ok(())
}
