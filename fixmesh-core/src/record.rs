/// Decoded mesh records and a reader for their plain-text form
///
/// A record carries the six already-decoded integer arrays of a model. The
/// text form is only a convenience for fixtures and the terminal viewer:
///
/// ```text
/// model pyramid
///   vx 0 64 -64
///   vy -128 0 0
///   vz 0 64 64
///   ix 0
///   iy 1
///   iz 2
/// endmodel
/// ```
use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::{
        i32 as parse_i32, multispace0, multispace1, space0, space1, u32 as parse_u32,
    },
    combinator::opt,
    multi::many0,
    sequence::preceded,
    IResult,
};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeshRecord {
    pub name: Option<String>,
    pub vertices_x: Vec<i32>,
    pub vertices_y: Vec<i32>,
    pub vertices_z: Vec<i32>,
    pub indices_x: Vec<u32>,
    pub indices_y: Vec<u32>,
    pub indices_z: Vec<u32>,
}

impl MeshRecord {
    pub fn parse(input: &str) -> Result<Self> {
        match parse_record(input) {
            Ok((rest, record)) if rest.trim().is_empty() => Ok(record),
            Ok((rest, _)) => Err(ModelError::Parse(format!(
                "unexpected trailing input: {:?}",
                rest.trim().chars().take(32).collect::<String>()
            ))),
            Err(e) => Err(ModelError::Parse(format!("{:?}", e))),
        }
    }

    /// A 12-face cube centred on the origin, `half` units to each side.
    ///
    /// Y points down as in the client, so the top face sits at `-half`.
    pub fn cube(half: i32) -> Self {
        let h = half;
        let corners = [
            (-h, -h, -h),
            (h, -h, -h),
            (h, -h, h),
            (-h, -h, h),
            (-h, h, -h),
            (h, h, -h),
            (h, h, h),
            (-h, h, h),
        ];
        let faces: [[u32; 3]; 12] = [
            [0, 1, 2],
            [0, 2, 3],
            [4, 6, 5],
            [4, 7, 6],
            [0, 4, 5],
            [0, 5, 1],
            [1, 5, 6],
            [1, 6, 2],
            [2, 6, 7],
            [2, 7, 3],
            [3, 7, 4],
            [3, 4, 0],
        ];

        Self {
            name: Some("cube".to_string()),
            vertices_x: corners.iter().map(|c| c.0).collect(),
            vertices_y: corners.iter().map(|c| c.1).collect(),
            vertices_z: corners.iter().map(|c| c.2).collect(),
            indices_x: faces.iter().map(|f| f[0]).collect(),
            indices_y: faces.iter().map(|f| f[1]).collect(),
            indices_z: faces.iter().map(|f| f[2]).collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices_x.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices_x.len()
    }
}

fn parse_record(input: &str) -> IResult<&str, MeshRecord> {
    let (input, _) = preceded(multispace0, tag("model"))(input)?;
    let (input, name) = opt(preceded(space1, take_till1(|c: char| c.is_whitespace())))(input)?;
    let (input, vertices_x) = signed_row("vx")(input)?;
    let (input, vertices_y) = signed_row("vy")(input)?;
    let (input, vertices_z) = signed_row("vz")(input)?;
    let (input, indices_x) = index_row("ix")(input)?;
    let (input, indices_y) = index_row("iy")(input)?;
    let (input, indices_z) = index_row("iz")(input)?;
    let (input, _) = preceded(multispace0, tag("endmodel"))(input)?;

    Ok((
        input,
        MeshRecord {
            name: name.map(str::to_string),
            vertices_x,
            vertices_y,
            vertices_z,
            indices_x,
            indices_y,
            indices_z,
        },
    ))
}

fn signed_row(label: &'static str) -> impl FnMut(&str) -> IResult<&str, Vec<i32>> {
    move |input: &str| {
        let (input, _) = preceded(multispace1, tag(label))(input)?;
        let (input, row) = many0(preceded(space1, parse_i32))(input)?;
        let (input, _) = space0(input)?;
        Ok((input, row))
    }
}

fn index_row(label: &'static str) -> impl FnMut(&str) -> IResult<&str, Vec<u32>> {
    move |input: &str| {
        let (input, _) = preceded(multispace1, tag(label))(input)?;
        let (input, row) = many0(preceded(space1, parse_u32))(input)?;
        let (input, _) = space0(input)?;
        Ok((input, row))
    }
}
