mod make_plate;

pub use make_plate::{Hole, MakePlate};
