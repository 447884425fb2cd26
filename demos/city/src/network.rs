//! The demo city: six junctions in three zones.
//!
//! ```text
//!   0 --5-- 1
//!   |       |
//!  10       3
//!   |       |
//!   2 --7-- 3 --4-- 4 --6-- 5
//! ```

use anyhow::Result;

use rd_network::{load_roads_reader, load_zones_reader, RoadNetwork};

const ROADS_CSV: &str = "\
from,to,weight\n\
0,1,5\n\
0,2,10\n\
1,3,3\n\
2,3,7\n\
3,4,4\n\
4,5,6\n\
";

// Zone 1 = north side, 2 = centre, 3 = east side.
const ZONES_CSV: &str = "\
node,zone\n\
0,1\n\
1,1\n\
2,2\n\
3,2\n\
4,3\n\
5,3\n\
";

pub const NODE_COUNT: u32 = 6;

pub fn build_city() -> Result<RoadNetwork> {
    let mut net = RoadNetwork::with_capacity(NODE_COUNT as usize);
    load_roads_reader(&mut net, ROADS_CSV.as_bytes())?;
    load_zones_reader(&mut net, ZONES_CSV.as_bytes())?;
    Ok(net)
}
