use crate::cast::Cast;
use crate::point::Field;
use crate::trail::TrailOwner;

/// Advances both trails one cell. With `growth_per_tick > 0` the trails
/// never lose their tail and become light-cycle walls.
pub struct MoveActorsAction {
    field: Field,
    growth_per_tick: usize,
}

impl MoveActorsAction {
    pub fn new(field: Field, growth_per_tick: usize) -> Self {
        MoveActorsAction { field, growth_per_tick }
    }

    pub fn execute(&mut self, cast: &mut Cast) {
        for owner in TrailOwner::ALL.iter() {
            let trail = cast.trail_mut(*owner);
            trail.schedule_growth(self.growth_per_tick);
            trail.advance(&self.field);
        }
    }
}
