pub fn worst_score(maximizing: bool) -> f32 {
    return match maximizing {
        true => f32::NEG_INFINITY,
        false => f32::INFINITY,
    }
}


pub fn is_better(new: f32, old: f32, maximizing: bool) -> bool {
    return match maximizing {
        true => new > old,
        false => new < old,
    }
}


pub fn best_of(new: f32, old: f32, maximizing: bool) -> f32 {
    return if is_better(new, old, maximizing) { new } else { old };
}


pub fn approx_eq(a: f32, b: f32, precision: f32) -> bool {
    if a == b {
        return true;
    }
    return (a - b).abs() <= precision;
}
