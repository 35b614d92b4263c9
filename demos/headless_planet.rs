//! Bakes a small planet into a navigation graph and spawns a seeker whose
//! target orbits the planet, each recalculation of the fields is logged and
//! the app exits after a handful of them
//!

use std::{f32::consts::PI, sync::Arc};

use bevy::{log::LogPlugin, prelude::*};
use bevy_flowfield_mesh_plugin::prelude::*;

/// Radius of the planet
const PLANET_RADIUS: f32 = 100.0;
/// Number of latitude bands of the planet mesh
const RINGS: u32 = 24;
/// Number of longitude slices of the planet mesh
const SEGMENTS: u32 = 48;
/// Radians per second the target orbits at
const ORBIT_SPEED: f32 = 0.5;
/// Recalculations to observe before exiting
const RECOMPUTES_BEFORE_EXIT: usize = 20;

fn main() {
	App::new()
		.add_plugins((MinimalPlugins, LogPlugin::default()))
		.add_plugins(FlowFieldMeshPlugin)
		.insert_resource(FlowFieldConfig::with_recompute_distance(5.0))
		.add_systems(Startup, setup_navigation)
		.add_systems(Update, orbit_target)
		.add_systems(FixedUpdate, report_fields.after(FlowFieldSet::Calculate))
		.run();
}

/// Labels the entity the seeker paths towards
#[derive(Component)]
struct Target;

/// Labels the entity holding the [FlowFieldEngine]
#[derive(Component)]
struct Seeker;

/// Build a UV sphere with a vertex at each pole
fn planet_piece() -> MeshPiece {
	let mut vertices = vec![Vec3::new(0.0, PLANET_RADIUS, 0.0)];
	for ring in 1..RINGS {
		let phi = PI * ring as f32 / RINGS as f32;
		for segment in 0..SEGMENTS {
			let theta = 2.0 * PI * segment as f32 / SEGMENTS as f32;
			vertices.push(Vec3::new(
				PLANET_RADIUS * phi.sin() * theta.cos(),
				PLANET_RADIUS * phi.cos(),
				PLANET_RADIUS * phi.sin() * theta.sin(),
			));
		}
	}
	let south = vertices.len() as u32;
	vertices.push(Vec3::new(0.0, -PLANET_RADIUS, 0.0));
	let index = |ring: u32, segment: u32| 1 + (ring - 1) * SEGMENTS + segment % SEGMENTS;
	let mut indices = Vec::new();
	for segment in 0..SEGMENTS {
		indices.extend_from_slice(&[0, index(1, segment + 1), index(1, segment)]);
		indices.extend_from_slice(&[south, index(RINGS - 1, segment), index(RINGS - 1, segment + 1)]);
	}
	for ring in 1..RINGS - 1 {
		for segment in 0..SEGMENTS {
			let a = index(ring, segment);
			let b = index(ring, segment + 1);
			let c = index(ring + 1, segment);
			let d = index(ring + 1, segment + 1);
			indices.extend_from_slice(&[a, b, c, b, d, c]);
		}
	}
	MeshPiece::new(vertices, indices, Transform::IDENTITY)
}

/// Bake the planet and spawn the target and seeker
fn setup_navigation(mut cmds: Commands, config: Res<FlowFieldConfig>) {
	let mut builder = NavGraphBuilder::with_config(&config);
	builder.add_piece(planet_piece());
	let graph = Arc::new(builder.build());
	info!("Planet baked into {} nodes", graph.len());
	let target = cmds
		.spawn((
			Target,
			Transform::from_xyz(PLANET_RADIUS * 1.2, 0.0, 0.0),
			GlobalTransform::default(),
		))
		.id();
	cmds.spawn((Seeker, FlowFieldBundle::new(graph, target, &config)));
}

/// Swing the target around the equator, the global transform is written directly as no transform propagation plugin is running
fn orbit_target(time: Res<Time>, mut target_q: Query<(&mut Transform, &mut GlobalTransform), With<Target>>) {
	for (mut tform, mut global) in &mut target_q {
		let angle = time.elapsed_secs() * ORBIT_SPEED;
		tform.translation = Vec3::new(angle.cos(), 0.0, angle.sin()) * PLANET_RADIUS * 1.2;
		*global = GlobalTransform::from(*tform);
	}
}

/// Log the direction out of the south pole after each recalculation and exit once enough have been seen
fn report_fields(
	mut events: EventReader<EventFlowFieldRecomputed>,
	seeker_q: Query<&FlowFieldEngine, With<Seeker>>,
	mut seen: Local<usize>,
	mut exit: EventWriter<AppExit>,
) {
	for event in events.read() {
		*seen += 1;
		let Ok(engine) = seeker_q.get(event.entity) else {
			continue;
		};
		let south = engine.get_graph().map(|g| g.len().saturating_sub(1)).unwrap_or_default();
		match (engine.cost_at(south), engine.direction_at(south)) {
			(Ok(cost), Ok(direction)) => info!(
				"Start node {}, south pole is {} hops away heading {}",
				event.start_node, cost, direction
			),
			(Err(e), _) | (_, Err(e)) => warn!("Could not sample the south pole: {}", e),
		}
	}
	if *seen >= RECOMPUTES_BEFORE_EXIT {
		exit.write(AppExit::Success);
	}
}
