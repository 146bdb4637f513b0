use crate::level::{HallwayId, Level, RoomId};

use petgraph::{
    algo::dijkstra,
    graph::NodeIndex,
    stable_graph::StableGraph,
    visit::{depth_first_search, Control, DfsEvent},
    Undirected,
};

pub type RoomGraph = StableGraph<RoomId, HallwayId, Undirected>;

/// Undirected graph with one node per room and one edge per bound hallway. Node indices match
/// room indices.
pub fn room_graph(level: &Level) -> RoomGraph {
    let mut graph = StableGraph::default();
    for id in level.room_ids() {
        graph.add_node(id);
    }
    for (i, h) in level.hallways().iter().enumerate() {
        if let Some(end) = h.end_room() {
            graph.add_edge(
                NodeIndex::new(h.start_room().0),
                NodeIndex::new(end.0),
                HallwayId(i),
            );
        }
    }

    graph
}

/// Number of hallways on the shortest route from `from` to every reachable room.
pub fn hop_distances(graph: &RoomGraph, from: RoomId) -> Vec<Option<usize>> {
    let costs = dijkstra(graph, NodeIndex::new(from.0), None, |_| 1usize);

    graph
        .node_indices()
        .map(|n| costs.get(&n).copied())
        .collect()
}

/// Assumes `graph` is a tree.
pub fn longest_path_to_point_in_tree<N, E>(
    graph: &StableGraph<N, E, Undirected>,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut predecessors = vec![NodeIndex::end(); graph.node_count()];
    let mut successors = vec![NodeIndex::end(); graph.node_count()];
    depth_first_search(graph, Some(target), |event| {
        if let DfsEvent::TreeEdge(u, v) = event {
            predecessors[v.index()] = u;
            successors[u.index()] = v;
        }

        Control::<()>::Continue
    });

    // Leaves of the DFS tree. Nodes the search never reached have no predecessor either.
    let no_successors: Vec<_> = graph
        .node_indices()
        .filter(|i| successors[i.index()] == NodeIndex::end())
        .filter(|i| *i == target || predecessors[i.index()] != NodeIndex::end())
        .collect();

    let mut max_path = vec![target];
    for i in no_successors.iter() {
        let mut next = *i;
        let mut path = vec![*i];
        while next != target {
            next = predecessors[next.index()];
            path.push(next);
        }
        if path.len() > max_path.len() {
            max_path = path;
        }
    }

    max_path
}

/// Assumes `graph` is a tree. Empty graphs have an empty path.
pub fn longest_path_in_tree<N, E>(graph: &StableGraph<N, E, Undirected>) -> Vec<NodeIndex> {
    // Do two DFS searches for the longest path from a node in order to find the longest path.
    let start = match graph.node_indices().next() {
        Some(start) => start,
        None => return Vec::new(),
    };
    let path = longest_path_to_point_in_tree(graph, start);

    longest_path_to_point_in_tree(graph, path[0])
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
