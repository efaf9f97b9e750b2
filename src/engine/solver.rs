//! Single-source shortest paths: breadth-first search for hop counts and
//! Bellman-Ford for weighted distances.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Debug;

use log::debug;

use super::error::SolveError;
use super::graph::Graph;

/// Which solver to run for a path request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
	/// Unweighted breadth-first search, distances in hops.
	Bfs,
	/// Weighted relaxation, distances as summed edge weights.
	BellmanFord,
}

impl Algorithm {
	/// Runs the algorithm, reporting distances as `f64` for either variant.
	pub fn solve<V>(self, graph: &Graph<V>, source: &V) -> Result<Solution<V, f64>, SolveError>
	where
		V: Ord + Clone + Debug,
	{
		match self {
			Algorithm::Bfs => bfs(graph, source).map(|s| s.map_distances(|hops| hops as f64)),
			Algorithm::BellmanFord => bellman_ford(graph, source),
		}
	}

	/// Human-readable name for logs and status messages.
	pub fn label(self) -> &'static str {
		match self {
			Algorithm::Bfs => "BFS",
			Algorithm::BellmanFord => "Bellman-Ford",
		}
	}
}

/// Distances and reconstructed paths from one source vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<V, D> {
	source: V,
	distances: BTreeMap<V, D>,
	predecessors: BTreeMap<V, V>,
	paths: BTreeMap<V, Vec<V>>,
}

/// Trait for distance values that can mark a vertex as unreached.
pub trait Distance: Copy {
	/// False for the unreached sentinel.
	fn is_reached(&self) -> bool;
}

impl Distance for usize {
	fn is_reached(&self) -> bool {
		true
	}
}

impl Distance for f64 {
	fn is_reached(&self) -> bool {
		self.is_finite()
	}
}

impl<V: Ord + Clone + Debug, D: Distance> Solution<V, D> {
	fn new(source: V, distances: BTreeMap<V, D>, predecessors: BTreeMap<V, V>) -> Self {
		let paths = build_all_paths(&source, &predecessors, distances.len());
		Self {
			source,
			distances,
			predecessors,
			paths,
		}
	}

	/// Vertex every path starts from.
	pub fn source(&self) -> &V {
		&self.source
	}

	/// Raw distance map. Bellman-Ford keeps unreached vertices at infinity.
	pub fn distances(&self) -> &BTreeMap<V, D> {
		&self.distances
	}

	/// Distance to `vertex`, or `None` when it was not reached.
	pub fn distance(&self, vertex: &V) -> Option<D> {
		self.distances.get(vertex).copied().filter(|d| d.is_reached())
	}

	/// Vertex each reached vertex was last improved from.
	pub fn predecessors(&self) -> &BTreeMap<V, V> {
		&self.predecessors
	}

	/// Paths to every reachable destination, source included.
	pub fn paths(&self) -> &BTreeMap<V, Vec<V>> {
		&self.paths
	}

	/// Path from the source to `destination`, or
	/// [`SolveError::NoPathExists`] when it was not reached.
	pub fn path_to(&self, destination: &V) -> Result<&[V], SolveError> {
		self.paths
			.get(destination)
			.map(Vec::as_slice)
			.ok_or_else(|| SolveError::NoPathExists(format!("{destination:?}")))
	}

	fn map_distances<E>(self, f: impl Fn(D) -> E) -> Solution<V, E> {
		Solution {
			source: self.source,
			distances: self.distances.into_iter().map(|(v, d)| (v, f(d))).collect(),
			predecessors: self.predecessors,
			paths: self.paths,
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
	Queued,
	Settled,
}

fn check_source<V: Ord + Clone + Debug>(graph: &Graph<V>, source: &V) -> Result<(), SolveError> {
	if !graph.contains(source) {
		return Err(SolveError::VertexNotFound(format!("{source:?}")));
	}
	graph.validate()
}

/// Breadth-first search; distances are hop counts and only cover reached vertices.
pub fn bfs<V>(graph: &Graph<V>, source: &V) -> Result<Solution<V, usize>, SolveError>
where
	V: Ord + Clone + Debug,
{
	check_source(graph, source)?;

	let mut distances = BTreeMap::from([(source.clone(), 0)]);
	let mut predecessors = BTreeMap::new();
	let mut state = BTreeMap::from([(source.clone(), Visit::Queued)]);
	let mut queue = VecDeque::from([source.clone()]);

	while let Some(current) = queue.pop_front() {
		let hops = distances[&current];
		for neighbor in graph.vertices()[&current].keys() {
			if state.contains_key(neighbor) {
				continue;
			}
			state.insert(neighbor.clone(), Visit::Queued);
			distances.insert(neighbor.clone(), hops + 1);
			predecessors.insert(neighbor.clone(), current.clone());
			queue.push_back(neighbor.clone());
		}
		state.insert(current, Visit::Settled);
	}

	debug_assert!(state.values().all(|s| *s == Visit::Settled));
	debug!(
		"bfs from {source:?} reached {} of {} vertices",
		distances.len(),
		graph.len()
	);
	Ok(Solution::new(source.clone(), distances, predecessors))
}

/// Bellman-Ford relaxation over non-negative weights.
///
/// Runs up to `|V|` passes over every directed edge and stops early once a
/// pass relaxes nothing. There is no negative-cycle check. Unreached
/// vertices keep a distance of `f64::INFINITY`.
pub fn bellman_ford<V>(graph: &Graph<V>, source: &V) -> Result<Solution<V, f64>, SolveError>
where
	V: Ord + Clone + Debug,
{
	check_source(graph, source)?;

	let mut distances: BTreeMap<V, f64> = graph
		.vertices()
		.keys()
		.map(|v| (v.clone(), f64::INFINITY))
		.collect();
	distances.insert(source.clone(), 0.0);
	let mut predecessors = BTreeMap::new();

	let mut passes = 0;
	for _ in 0..graph.len() {
		passes += 1;
		let mut relaxed = false;
		for (from, adjacency) in graph.vertices() {
			let base = distances[from];
			for (to, weight) in adjacency {
				let candidate = base + weight;
				if distances[to] > candidate {
					distances.insert(to.clone(), candidate);
					predecessors.insert(to.clone(), from.clone());
					relaxed = true;
				}
			}
		}
		if !relaxed {
			break;
		}
	}

	debug!("bellman-ford from {source:?} settled after {passes} passes");
	Ok(Solution::new(source.clone(), distances, predecessors))
}

/// Walks each predecessor chain back to the source. Chains that do not reach
/// the source within `limit` hops are left out.
fn build_all_paths<V: Ord + Clone>(
	source: &V,
	predecessors: &BTreeMap<V, V>,
	limit: usize,
) -> BTreeMap<V, Vec<V>> {
	let mut paths = BTreeMap::from([(source.clone(), vec![source.clone()])]);
	for destination in predecessors.keys() {
		if destination == source {
			continue;
		}
		if let Some(path) = walk_back(source, destination, predecessors, limit) {
			paths.insert(destination.clone(), path);
		}
	}
	paths
}

fn walk_back<V: Ord + Clone>(
	source: &V,
	destination: &V,
	predecessors: &BTreeMap<V, V>,
	limit: usize,
) -> Option<Vec<V>> {
	let mut path = vec![destination.clone()];
	let mut current = destination;
	while current != source {
		if path.len() > limit {
			return None;
		}
		current = predecessors.get(current)?;
		path.push(current.clone());
	}
	path.reverse();
	Some(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Deterministic pseudo-random sequence for building test graphs.
	struct Lcg(u64);

	impl Lcg {
		fn next(&mut self) -> f64 {
			self.0 = (self.0 * 9301 + 49297) % 233280;
			self.0 as f64 / 233280.0
		}
	}

	fn random_graph(seed: u64, n: usize, density: f64) -> Graph<usize> {
		let mut rng = Lcg(seed);
		let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
		for a in 0..n {
			for b in (a + 1)..n {
				if rng.next() < density {
					let w = (rng.next() * 100.0).round() / 10.0;
					adjacency[a].push((b, w));
					adjacency[b].push((a, w));
				}
			}
		}
		let mut g = Graph::new();
		for (v, neighbors) in adjacency.into_iter().enumerate() {
			g.add_vertex(v, neighbors);
		}
		g
	}

	fn scenario() -> Graph<&'static str> {
		let mut g = Graph::new();
		g.add_vertex("A", [("B", 3.0)]);
		g.add_vertex("B", [("A", 3.0), ("C", 4.0)]);
		g.add_vertex("C", [("B", 4.0)]);
		g
	}

	/// All-pairs hop counts by repeated relaxation over an adjacency matrix.
	fn brute_force_hops(g: &Graph<usize>) -> Vec<Vec<Option<usize>>> {
		let n = g.len();
		let mut d = vec![vec![None; n]; n];
		for i in 0..n {
			d[i][i] = Some(0);
			for j in g.vertices()[&i].keys() {
				d[i][*j] = Some(1);
			}
		}
		for k in 0..n {
			for i in 0..n {
				for j in 0..n {
					if let (Some(a), Some(b)) = (d[i][k], d[k][j]) {
						if d[i][j].is_none_or(|c| a + b < c) {
							d[i][j] = Some(a + b);
						}
					}
				}
			}
		}
		d
	}

	fn dijkstra(g: &Graph<usize>, source: usize) -> Vec<f64> {
		let n = g.len();
		let mut dist = vec![f64::INFINITY; n];
		let mut done = vec![false; n];
		dist[source] = 0.0;
		for _ in 0..n {
			let Some(u) = (0..n)
				.filter(|&v| !done[v] && dist[v].is_finite())
				.min_by(|&a, &b| dist[a].total_cmp(&dist[b]))
			else {
				break;
			};
			done[u] = true;
			for (&v, &w) in &g.vertices()[&u] {
				if dist[u] + w < dist[v] {
					dist[v] = dist[u] + w;
				}
			}
		}
		dist
	}

	fn assert_paths_consistent(g: &Graph<usize>, solution: &Solution<usize, f64>, weighted: bool) {
		for (dest, path) in solution.paths() {
			assert_eq!(path.first(), Some(solution.source()));
			assert_eq!(path.last(), Some(dest));
			let mut seen = std::collections::BTreeSet::new();
			assert!(path.iter().all(|v| seen.insert(*v)), "repeated vertex in {path:?}");
			let mut total = 0.0;
			for pair in path.windows(2) {
				total += g.weight(&pair[0], &pair[1]).expect("consecutive vertices are adjacent");
			}
			let expected = solution.distance(dest).unwrap();
			if weighted {
				assert!((total - expected).abs() < 1e-9, "{total} != {expected}");
			} else {
				assert_eq!((path.len() - 1) as f64, expected);
			}
		}
	}

	#[test]
	fn scenario_bfs_counts_hops() {
		let solution = bfs(&scenario(), &"A").unwrap();
		assert_eq!(
			solution.distances(),
			&BTreeMap::from([("A", 0), ("B", 1), ("C", 2)])
		);
		assert_eq!(solution.path_to(&"C").unwrap(), ["A", "B", "C"]);
		assert_eq!(solution.path_to(&"A").unwrap(), ["A"]);
	}

	#[test]
	fn scenario_bellman_ford_sums_weights() {
		let solution = bellman_ford(&scenario(), &"A").unwrap();
		assert_eq!(
			solution.distances(),
			&BTreeMap::from([("A", 0.0), ("B", 3.0), ("C", 7.0)])
		);
		assert_eq!(solution.path_to(&"C").unwrap(), ["A", "B", "C"]);
	}

	#[test]
	fn bfs_prefers_fewer_hops_over_lighter_path() {
		let mut g = Graph::new();
		g.add_vertex("s", [("a", 1.0), ("t", 10.0)]);
		g.add_vertex("a", [("s", 1.0), ("t", 1.0)]);
		g.add_vertex("t", [("s", 10.0), ("a", 1.0)]);
		assert_eq!(bfs(&g, &"s").unwrap().path_to(&"t").unwrap(), ["s", "t"]);
		assert_eq!(
			bellman_ford(&g, &"s").unwrap().path_to(&"t").unwrap(),
			["s", "a", "t"]
		);
	}

	#[test]
	fn unknown_source_is_rejected() {
		assert_eq!(
			bfs(&scenario(), &"Z"),
			Err(SolveError::VertexNotFound("\"Z\"".into()))
		);
		assert!(matches!(
			bellman_ford(&scenario(), &"Z"),
			Err(SolveError::VertexNotFound(_))
		));
	}

	#[test]
	fn disconnected_vertex_has_no_path() {
		let mut g = scenario();
		g.add_vertex("D", []);
		for algorithm in [Algorithm::Bfs, Algorithm::BellmanFord] {
			let solution = algorithm.solve(&g, &"A").unwrap();
			assert_eq!(
				solution.path_to(&"D"),
				Err(SolveError::NoPathExists("\"D\"".into()))
			);
			assert_eq!(solution.distance(&"D"), None);
			assert_eq!(solution.path_to(&"C").unwrap(), ["A", "B", "C"]);
		}
		let weighted = bellman_ford(&g, &"A").unwrap();
		assert_eq!(weighted.distances()[&"D"], f64::INFINITY);
		assert!(!bfs(&g, &"A").unwrap().distances().contains_key(&"D"));
	}

	#[test]
	fn dangling_neighbor_fails_solve() {
		let mut g = scenario();
		g.add_vertex("C", [("B", 4.0), ("Q", 1.0)]);
		assert!(matches!(
			bfs(&g, &"A"),
			Err(SolveError::DanglingNeighbor { .. })
		));
	}

	#[test]
	fn bfs_matches_brute_force_hops() {
		for seed in 0..12 {
			let g = random_graph(seed, 3 + seed as usize, 0.3);
			let reference = brute_force_hops(&g);
			for source in 0..g.len() {
				let solution = bfs(&g, &source).unwrap();
				for target in 0..g.len() {
					assert_eq!(
						solution.distance(&target),
						reference[source][target],
						"seed {seed} {source}->{target}"
					);
				}
				let as_f64 = Algorithm::Bfs.solve(&g, &source).unwrap();
				assert_paths_consistent(&g, &as_f64, false);
			}
		}
	}

	#[test]
	fn bellman_ford_matches_dijkstra() {
		for seed in 0..10 {
			let g = random_graph(seed * 7 + 1, 20, 0.2);
			for source in [0, 7, 19] {
				let solution = bellman_ford(&g, &source).unwrap();
				let reference = dijkstra(&g, source);
				for (target, expected) in reference.iter().enumerate() {
					let actual = solution.distances()[&target];
					if expected.is_finite() {
						assert!((actual - expected).abs() < 1e-9, "seed {seed} {source}->{target}");
					} else {
						assert_eq!(actual, f64::INFINITY);
					}
				}
				assert_paths_consistent(&g, &solution, true);
			}
		}
	}

	#[test]
	fn solving_twice_is_identical() {
		let g = random_graph(42, 15, 0.25);
		for algorithm in [Algorithm::Bfs, Algorithm::BellmanFord] {
			assert_eq!(algorithm.solve(&g, &3), algorithm.solve(&g, &3));
		}
	}

	#[test]
	fn broken_predecessor_chain_yields_no_path() {
		let predecessors = BTreeMap::from([(2, 1), (1, 2)]);
		let paths = build_all_paths(&0, &predecessors, 3);
		assert_eq!(paths, BTreeMap::from([(0, vec![0])]));
	}
}
