use trellis::{Bind, Container, Dc};

struct Config {
    url: &'static str
}

struct Logger;

#[derive(Default, Bind)]
struct Handlers {
    config: Option<Dc<Config>>,
    logger: Option<Dc<Logger>>,
    #[bind(skip)]
    requests: u64,
}

fn main() {
    let container = Container::new();
    container.register_singleton(Config { url: "sqlite://test.db" }).unwrap();
    container.register_singleton_factory(|| Logger).unwrap();

    let mut handlers = Handlers::default();
    container.bind(&mut handlers).unwrap();

    assert_eq!(handlers.config.unwrap().url, "sqlite://test.db");
    assert!(handlers.logger.is_some());
    assert_eq!(handlers.requests, 0);
}
