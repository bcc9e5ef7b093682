//! Physical constants and the literal initial conditions of the default
//! solar system scenario.
//!
//! All values are SI: meters, meters/second, kilograms. Inclinations are in
//! degrees relative to the reference plane.

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.67430e-11;

/// Separations below this are clamped before the inverse-square law (m)
pub const MIN_DISTANCE: f64 = 1.0;

/// Seconds in one simulated hour
pub const HOUR: f64 = 60.0 * 60.0;

/// Extra speed-up applied on top of "one simulated hour per real second"
pub const TIME_SCALAR: f64 = 1000.0;

/// Default time step: simulated seconds advanced per real second
pub const TIME_STEP: f64 = HOUR * TIME_SCALAR;

/// Frames slower than this rate are not integrated
pub const MIN_FPS: f32 = 10.0;

/// Starting conditions and appearance of one body in the default scenario
#[derive(Debug, Clone, Copy)]
pub struct OrbitalStart {
    pub label: &'static str,
    pub distance: f64,    // from the sun (m)
    pub speed: f64,       // mean orbital speed (m/s)
    pub mass: f64,        // kg
    pub radius: f64,      // m, display only
    pub inclination: f64, // degrees
    pub color: [f32; 3],  // linear RGB, display only
}

pub const SUN_MASS: f64 = 1.988416e30;
pub const SUN_RADIUS: f64 = 6.9634e8;

pub const EARTH_MASS: f64 = 5.972e24;
pub const EARTH_SUN_DISTANCE: f64 = 1.49e11;
// 107,000 km/h
pub const EARTH_SPEED: f64 = 29722.2222;

/// Sun first, then the planets; Sun must stay at index 0 (the viewer offsets orbits by its radius)
pub const SOLAR_SYSTEM: [OrbitalStart; 9] = [
    OrbitalStart {
        label: "Sun",
        distance: 0.0,
        speed: 0.0,
        mass: SUN_MASS,
        radius: SUN_RADIUS,
        inclination: 0.0,
        color: [0.99, 0.98, 0.0],
    },
    OrbitalStart {
        label: "Earth",
        distance: EARTH_SUN_DISTANCE,
        speed: EARTH_SPEED,
        mass: EARTH_MASS,
        radius: 6.371e6,
        inclination: 0.0,
        color: [0.0, 0.47, 0.95],
    },
    OrbitalStart {
        label: "Jupiter",
        distance: 7.785e11,
        speed: 13070.0,
        mass: 1.8982e27,
        radius: 6.9911e7,
        inclination: 1.303,
        color: [0.5, 0.42, 0.31],
    },
    OrbitalStart {
        label: "Mercury",
        distance: 5.79e10,
        speed: 47362.0,
        mass: 3.3011e23,
        radius: 2.4397e6,
        inclination: 7.0,
        color: [0.51, 0.51, 0.51],
    },
    OrbitalStart {
        label: "Venus",
        distance: 1.082e11,
        speed: 35020.0,
        mass: 4.8675e24,
        radius: 6.0518e6,
        inclination: 3.39,
        color: [0.9, 0.16, 0.22],
    },
    OrbitalStart {
        label: "Mars",
        distance: 2.279e11,
        speed: 24077.0,
        mass: 6.4171e23,
        radius: 3.3895e6,
        inclination: 1.85,
        color: [1.0, 0.63, 0.0],
    },
    OrbitalStart {
        label: "Saturn",
        distance: 1.434e12,
        speed: 9680.0,
        mass: 5.6834e26,
        radius: 5.8232e7,
        inclination: 2.485,
        color: [0.53, 0.24, 0.75],
    },
    OrbitalStart {
        label: "Uranus",
        distance: 2.871e12,
        speed: 6800.0,
        mass: 8.681e25,
        radius: 2.5362e7,
        inclination: 0.773,
        color: [0.4, 0.75, 1.0],
    },
    OrbitalStart {
        label: "Neptune",
        distance: 4.495e12,
        speed: 5430.0,
        mass: 1.02413e26,
        radius: 2.4622e7,
        inclination: 1.77,
        color: [0.0, 0.32, 0.67],
    },
];
