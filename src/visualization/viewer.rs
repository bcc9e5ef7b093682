use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::diagnostics;
use crate::simulation::engine::StepOutcome;
use crate::simulation::integrator::Scheme;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;

/// Component tagging each sphere with its body index into Scenario.system.bodies
#[derive(Component)]
struct BodyIndex(pub usize);

/// Meters per world unit for positions and radii.
/// Only the viewer reads these, the simulation works in meters.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DisplayScale {
    pub distance_scale: f64,
    pub radius_scale: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self {
            distance_scale: 7.0e8,
            radius_scale: 1.0e6,
        }
    }
}

impl DisplayScale {
    pub fn radius(&self, radius_m: f64) -> f32 {
        // keep small bodies visible
        ((radius_m / self.radius_scale) as f32).max(2.0)
    }

    /// World position of a body. Radii are drawn at a far larger scale than
    /// distances, so orbiting bodies are pushed outward by their own radius
    /// and the central body's radius to stay outside it.
    pub fn world_position(&self, x: &NVec3, radius: f32, central_radius: f32) -> Vec3 {
        let pos = Vec3::new(
            (x.x / self.distance_scale) as f32,
            (x.y / self.distance_scale) as f32,
            (x.z / self.distance_scale) as f32,
        );
        pos + pos.normalize_or_zero() * (radius + central_radius)
    }
}

#[derive(Resource, Default)]
struct FrameStats {
    last_step_ms: f64,
    skipped: u64,
}

/// Body whose readout is shown in the title bar, cycled with Tab
#[derive(Resource, Default)]
struct Selection(Option<usize>);

/// Open a window and run `scenario`, one `simulate` call per frame.
///
/// Keys: 1/2/3 select Euler/Verlet/RK4, +/- scale the simulation rate,
/// P toggles pair-halved gravity, Tab cycles the selected body.
pub fn run_viewer(scenario: Scenario) {
    log::info!(
        "starting viewer with {} bodies, integrator {}",
        scenario.system.bodies.len(),
        scenario.engine.scheme
    );

    App::new()
        .insert_resource(scenario)
        .insert_resource(DisplayScale::default())
        .init_resource::<FrameStats>()
        .init_resource::<Selection>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "solsim".into(),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (settings_input, physics_step, sync_transforms, update_title).chain(),
        )
        .run();
}

/// Startup system: spawn camera, axes and one sphere per body
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
    scale: Res<DisplayScale>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..default()
        },
        transform: Transform::from_xyz(250.0, 1900.0, 3350.0).looking_at(Vec3::new(1700.0, 350.0, 140.0), Vec3::Y),
        ..default()
    });

    // light from the central body
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1.0e9,
            range: 1.0e4,
            ..default()
        },
        ..default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    let central_radius = scenario.appearance.first().map_or(0.0, |a| scale.radius(a.radius));

    for (i, (b, look)) in scenario
        .system
        .bodies
        .iter()
        .zip(scenario.appearance.iter())
        .enumerate()
    {
        let radius = scale.radius(look.radius);
        let offset = if i == 0 { 0.0 } else { central_radius };
        let [r, g, bl] = look.color;

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(radius).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(r, g, bl),
                    unlit: true,
                    ..default()
                }),
                transform: Transform::from_translation(scale.world_position(&b.x, radius, offset)),
                ..default()
            },
            BodyIndex(i),
        ));
    }
}

fn settings_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<Scenario>,
    mut selection: ResMut<Selection>,
) {
    let picks = [
        (KeyCode::Digit1, Scheme::Euler),
        (KeyCode::Digit2, Scheme::Verlet),
        (KeyCode::Digit3, Scheme::Rk4),
    ];
    for (key, scheme) in picks {
        if keys.just_pressed(key) {
            scenario.engine.set_scheme(scheme);
        }
    }

    if keys.just_pressed(KeyCode::Equal) {
        scenario.parameters.scale_rate(2.0);
    }
    if keys.just_pressed(KeyCode::Minus) {
        scenario.parameters.scale_rate(0.5);
    }
    if keys.just_pressed(KeyCode::KeyP) {
        let pairwise = !scenario.engine.pairwise;
        scenario.set_pairwise(pairwise);
    }

    if keys.just_pressed(KeyCode::Tab) {
        let n = scenario.system.bodies.len();
        selection.0 = match selection.0 {
            None if n > 0 => Some(0),
            Some(i) if i + 1 < n => Some(i + 1),
            _ => None,
        };
    }
}

/// Per-frame physics integration
fn physics_step(mut scenario: ResMut<Scenario>, time: Res<Time>, mut stats: ResMut<FrameStats>) {
    match scenario.simulate(time.delta_seconds()) {
        StepOutcome::Stepped { elapsed, .. } => stats.last_step_ms = elapsed.as_secs_f64() * 1000.0,
        StepOutcome::Skipped => stats.skipped += 1,
    }
}

fn sync_transforms(
    scenario: Res<Scenario>,
    scale: Res<DisplayScale>,
    mut query: Query<(&BodyIndex, &mut Transform)>,
) {
    let central_radius = scenario.appearance.first().map_or(0.0, |a| scale.radius(a.radius));

    for (BodyIndex(i), mut transform) in &mut query {
        if let (Some(b), Some(look)) = (scenario.system.bodies.get(*i), scenario.appearance.get(*i)) {
            let offset = if *i == 0 { 0.0 } else { central_radius };
            transform.translation = scale.world_position(&b.x, scale.radius(look.radius), offset);
        }
    }
}

fn update_title(
    scenario: Res<Scenario>,
    stats: Res<FrameStats>,
    selection: Res<Selection>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let mut title = format!(
        "solsim | {} | days {:.2} | rate x{} | step {:.4} ms | skipped {}",
        scenario.engine.scheme,
        scenario.system.days_passed(),
        scenario.parameters.rate,
        stats.last_step_ms,
        stats.skipped
    );

    if let Some((i, body)) = selection.0.and_then(|i| scenario.system.bodies.get(i).map(|b| (i, b))) {
        title.push_str(&format!(
            " | {}: |v| {:.0} m/s, d {:.3e} m, inc {:.2} deg",
            scenario.label(i),
            body.v.norm(),
            body.x.norm(),
            diagnostics::inclination(body).to_degrees()
        ));
    }

    for mut window in &mut windows {
        if window.title != title {
            window.title = title.clone();
        }
    }
}

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 200.0;
    let axis_thickness = 0.5;

    let axes = [
        (Cuboid::new(axis_len, axis_thickness, axis_thickness), Color::srgb(1.0, 0.0, 0.0)),
        (Cuboid::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.0, 1.0, 0.0)),
        (Cuboid::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.0, 0.0, 1.0)),
    ];

    for (cuboid, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(cuboid.mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..default()
            }),
            ..default()
        });
    }
}
