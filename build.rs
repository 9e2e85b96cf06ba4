fn main() {
    // Only the espidf target needs the ESP-IDF sysenv; host builds and
    // tests compile without it.
    #[cfg(feature = "espidf")]
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
