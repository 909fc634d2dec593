use std::path::Path;

use anyhow::{ensure, Context, Result};

const HEADER_LEN: usize = 80;
const COUNT_LEN: usize = 4;
/// Normal, three vertices, and a trailing u16 attribute count.
const RECORD_LEN: usize = 12 * 4 + 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlTriangle {
    pub normal: [f32; 3],
    pub vertices: [[f32; 3]; 3],
}

/// Flattened, unindexed triangle soup: three entries per triangle, each
/// vertex carrying its face normal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

impl MeshData {
    pub fn from_triangles(triangles: &[StlTriangle]) -> Self {
        let mut positions = Vec::with_capacity(triangles.len() * 3);
        let mut normals = Vec::with_capacity(triangles.len() * 3);
        for triangle in triangles {
            for vertex in triangle.vertices {
                positions.push(vertex);
                normals.push(triangle.normal);
            }
        }
        Self { positions, normals }
    }

    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Parses a binary STL buffer. Bytes past the declared triangle records are
/// ignored.
pub fn parse_stl(bytes: &[u8]) -> Result<Vec<StlTriangle>> {
    ensure!(
        bytes.len() >= HEADER_LEN + COUNT_LEN,
        "STL data is {} bytes, shorter than the {}-byte header",
        bytes.len(),
        HEADER_LEN + COUNT_LEN
    );

    let count = u32::from_le_bytes([
        bytes[HEADER_LEN],
        bytes[HEADER_LEN + 1],
        bytes[HEADER_LEN + 2],
        bytes[HEADER_LEN + 3],
    ]) as usize;

    let body = &bytes[HEADER_LEN + COUNT_LEN..];
    let needed = count
        .checked_mul(RECORD_LEN)
        .context("STL triangle count overflows")?;
    ensure!(
        body.len() >= needed,
        "STL declares {count} triangles ({needed} bytes) but only {} bytes follow the header",
        body.len()
    );

    Ok(body
        .chunks_exact(RECORD_LEN)
        .take(count)
        .map(read_triangle)
        .collect())
}

fn read_triangle(record: &[u8]) -> StlTriangle {
    let mut floats = record[..RECORD_LEN - 2]
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]));
    let mut next3 = || {
        [
            floats.next().unwrap_or_default(),
            floats.next().unwrap_or_default(),
            floats.next().unwrap_or_default(),
        ]
    };

    let normal = next3();
    let vertices = [next3(), next3(), next3()];
    StlTriangle { normal, vertices }
}

pub fn load_stl_file(path: &Path) -> Result<MeshData> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read mesh {}", path.display()))?;
    let triangles =
        parse_stl(&bytes).with_context(|| format!("failed to parse mesh {}", path.display()))?;
    Ok(MeshData::from_triangles(&triangles))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(triangles: &[StlTriangle]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for t in triangles {
            for v in std::iter::once(t.normal).chain(t.vertices) {
                for c in v {
                    bytes.extend_from_slice(&c.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }
        bytes
    }

    fn sample() -> Vec<StlTriangle> {
        vec![
            StlTriangle {
                normal: [0.0, 0.0, 1.0],
                vertices: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            },
            StlTriangle {
                normal: [0.0, 1.0, 0.0],
                vertices: [[2.0, 0.0, 0.0], [2.0, 0.0, 1.0], [3.0, 0.0, 0.5]],
            },
        ]
    }

    #[test]
    fn parses_declared_triangles() {
        let parsed = parse_stl(&encode(&sample())).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn flattening_repeats_face_normals() {
        let mesh = MeshData::from_triangles(&sample());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions[4], [2.0, 0.0, 1.0]);
        assert!(mesh.normals[..3].iter().all(|n| *n == [0.0, 0.0, 1.0]));
        assert!(mesh.normals[3..].iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn empty_mesh_is_valid() {
        let parsed = parse_stl(&encode(&[])).unwrap();
        assert!(parsed.is_empty());
        assert!(MeshData::from_triangles(&parsed).is_empty());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = encode(&sample());
        bytes.extend_from_slice(&[0xAB; 7]);
        assert_eq!(parse_stl(&bytes).unwrap().len(), 2);
    }

    #[test]
    fn short_header_is_rejected() {
        let err = parse_stl(&[0u8; 40]).unwrap_err();
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn truncated_records_are_rejected() {
        let mut bytes = encode(&sample());
        bytes.truncate(bytes.len() - 10);
        let err = parse_stl(&bytes).unwrap_err();
        assert!(err.to_string().contains("declares 2 triangles"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_stl_file(Path::new("does/not/exist.stl")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.stl"));
    }
}
