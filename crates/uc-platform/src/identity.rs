/// Host name of this machine, if it has a usable one.
pub fn hostname() -> Option<String> {
    let name = gethostname::gethostname().to_string_lossy().trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
