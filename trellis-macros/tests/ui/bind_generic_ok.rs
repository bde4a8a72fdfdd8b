use trellis::{Bind, Container, Dc};

#[derive(Bind)]
struct Slot<T: Send + Sync + 'static> {
    service: Option<Dc<T>>,
}

fn main() {
    let container = Container::new();
    container.register_transient_factory(|| 42_u32).unwrap();

    let mut slot = Slot::<u32> { service: None };
    container.bind(&mut slot).unwrap();

    assert_eq!(slot.service.map(|s| *s), Some(42));
}
