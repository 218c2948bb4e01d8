//! Swizzle accessor enumeration and rendering.
//!
//! Vector types in the target C++ math library expose accessors such as
//! `.xy()` or `.zyx()` that extract components by name, in any order and
//! with repetition allowed. This module enumerates every combination of
//! component letters up to four components and renders the matching
//! declaration or inline definition text.

use itertools::Itertools;
use log::info;
use std::io;

/// Accessors are generated for 1 up to 4 selected components.
pub const MAX_ARITY: usize = 4;

/// One generation job: the component alphabet naming the addressable
/// components (its length is the vector's dimensionality), the scalar type
/// of a single component, and the vector family name used to build type
/// names like `Vector2`/`Vector3`/`Vector4`.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub alphabet: String,
    pub scalar: String,
    pub family: String,
}

impl Job {
    pub fn new(alphabet: &str, scalar: &str, family: &str) -> Self {
        Job {
            alphabet: alphabet.to_string(),
            scalar: scalar.to_string(),
            family: family.to_string(),
        }
    }
}

/// The six invocations the original tool performs, in order.
pub fn fixed_jobs() -> Vec<Job> {
    [
        ("xy", "float", "Vector"),
        ("xyz", "float", "Vector"),
        ("xyzw", "float", "Vector"),
        ("xy", "bool", "BVector"),
        ("xyz", "bool", "BVector"),
        ("xyzw", "bool", "BVector"),
    ]
    .iter()
    .map(|&(alphabet, scalar, family)| Job::new(alphabet, scalar, family))
    .collect()
}

#[derive(Debug)]
pub enum GenError {
    Io(io::Error),
    EmptyAlphabet,
}

impl From<io::Error> for GenError {
    fn from(err: io::Error) -> Self {
        GenError::Io(err)
    }
}

/// Iterates over all index tuples of a fixed arity with indices in
/// `0..base`, in lexicographic order (the leftmost index varies slowest).
pub struct IndexTuples {
    base: usize,
    next: Option<Vec<usize>>,
}

impl IndexTuples {
    pub fn new(base: usize, arity: usize) -> Self {
        debug_assert!(base > 0);
        debug_assert!(arity > 0);
        IndexTuples {
            base,
            next: Some(vec![0; arity]),
        }
    }
}

impl Iterator for IndexTuples {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;

        // Increment the rightmost position, carrying leftwards. If every
        // position rolls over the enumeration is finished.
        let mut succ = current.clone();
        for i in (0..succ.len()).rev() {
            succ[i] += 1;
            if succ[i] < self.base {
                self.next = Some(succ);
                break;
            }
            succ[i] = 0;
        }

        Some(current)
    }
}

/// Number of lines a single declaration or definition pass emits for an
/// alphabet of length N: N + N² + N³ + N⁴.
pub fn line_count(alphabet: &str) -> Result<usize, GenError> {
    let n = letters(alphabet)?.len();
    Ok((1..=MAX_ARITY).map(|arity| n.pow(arity as u32)).sum())
}

/// Renders one declaration line, e.g. `\tconst Vector2 xy() const;`.
pub fn declaration(job: &Job, indices: &[usize]) -> String {
    let name = accessor_name(&job.alphabet, indices);
    if indices.len() == 1 {
        format!("\t{} {}() const;", job.scalar, name)
    } else {
        format!("\tconst {}{} {}() const;", job.family, indices.len(), name)
    }
}

/// Renders one inline definition line, e.g.
/// `inline const Vector2 Vector2::xy() const {return Swizzle<0, 1>();}`.
///
/// The definition is scoped to the vector type whose dimensionality equals
/// the alphabet length, and delegates to the `Swizzle` extraction primitive
/// with each selected letter's position in the alphabet, in name order.
pub fn definition(job: &Job, indices: &[usize]) -> String {
    let name = accessor_name(&job.alphabet, indices);
    let scope = format!("{}{}", job.family, job.alphabet.chars().count());
    let args = indices.iter().format(", ");
    if indices.len() == 1 {
        format!(
            "inline {} {}::{}() const {{return Swizzle<{}>();}}",
            job.scalar, scope, name, args
        )
    } else {
        format!(
            "inline const {}{} {}::{}() const {{return Swizzle<{}>();}}",
            job.family,
            indices.len(),
            scope,
            name,
            args
        )
    }
}

/// Writes the declaration pass for one job: every 1- to 4-letter
/// combination, one line each, in enumeration order.
pub fn declarations(job: &Job, output: &mut dyn io::Write) -> Result<(), GenError> {
    let n = letters(&job.alphabet)?.len();
    info!("declarations for {}{}", job.family, n);
    for arity in 1..=MAX_ARITY {
        for indices in IndexTuples::new(n, arity) {
            writeln!(output, "{}", declaration(job, &indices))?;
        }
    }
    Ok(())
}

/// Writes the definition pass for one job. Emits the same combinations in
/// the same order as [`declarations`], so the two passes pair up into one
/// header/source representation of the interface.
pub fn definitions(job: &Job, output: &mut dyn io::Write) -> Result<(), GenError> {
    let n = letters(&job.alphabet)?.len();
    info!("definitions for {}{}", job.family, n);
    for arity in 1..=MAX_ARITY {
        for indices in IndexTuples::new(n, arity) {
            writeln!(output, "{}", definition(job, &indices))?;
        }
    }
    Ok(())
}

/// Runs every declaration pass over the jobs, then every definition pass,
/// matching the output order of the original tool.
pub fn generate_all(jobs: &[Job], output: &mut dyn io::Write) -> Result<(), GenError> {
    for job in jobs {
        declarations(job, output)?;
    }
    for job in jobs {
        definitions(job, output)?;
    }
    Ok(())
}

fn accessor_name(alphabet: &str, indices: &[usize]) -> String {
    let letters: Vec<char> = alphabet.chars().collect();
    indices.iter().map(|&i| letters[i]).collect()
}

fn letters(alphabet: &str) -> Result<Vec<char>, GenError> {
    let letters: Vec<char> = alphabet.chars().collect();
    if letters.is_empty() {
        return Err(GenError::EmptyAlphabet);
    }
    Ok(letters)
}

#[cfg(test)]
fn lines(bytes: &[u8]) -> Vec<String> {
    ::std::str::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn tuple_enumeration_order() {
    let tuples: Vec<Vec<usize>> = IndexTuples::new(2, 2).collect();
    assert_eq!(
        tuples,
        vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
    );

    let triples: Vec<Vec<usize>> = IndexTuples::new(3, 3).collect();
    assert_eq!(triples.len(), 27);
    assert_eq!(triples[0], vec![0, 0, 0]);
    assert_eq!(triples[1], vec![0, 0, 1]);
    assert_eq!(triples[26], vec![2, 2, 2]);
    // Lexicographic: the leftmost index varies slowest.
    for pair in triples.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn pass_line_counts() {
    for &(alphabet, expected) in &[("x", 4), ("xy", 30), ("xyz", 120), ("xyzw", 340)] {
        assert_eq!(line_count(alphabet).unwrap(), expected);

        let job = Job::new(alphabet, "float", "Vector");
        let mut buffer = Vec::new();
        declarations(&job, &mut buffer).unwrap();
        assert_eq!(lines(&buffer).len(), expected);

        let mut buffer = Vec::new();
        definitions(&job, &mut buffer).unwrap();
        assert_eq!(lines(&buffer).len(), expected);
    }
}

#[test]
fn vector2_declarations() {
    let job = Job::new("xy", "float", "Vector");
    let mut buffer = Vec::new();
    declarations(&job, &mut buffer).unwrap();
    let lines = lines(&buffer);

    assert_eq!(lines.len(), 30);
    assert_eq!(lines[0], "\tfloat x() const;");
    assert_eq!(lines[1], "\tfloat y() const;");
    assert_eq!(lines[2], "\tconst Vector2 xx() const;");
    assert_eq!(lines[3], "\tconst Vector2 xy() const;");
    assert_eq!(lines[4], "\tconst Vector2 yx() const;");
    assert_eq!(lines[5], "\tconst Vector2 yy() const;");
    assert_eq!(lines[6], "\tconst Vector3 xxx() const;");
    assert_eq!(lines[13], "\tconst Vector3 yyy() const;");
    assert_eq!(lines[14], "\tconst Vector4 xxxx() const;");
    assert_eq!(lines[29], "\tconst Vector4 yyyy() const;");

    assert_eq!(lines.iter().filter(|l| l.contains("Vector3")).count(), 8);
    assert_eq!(lines.iter().filter(|l| l.contains("Vector4")).count(), 16);
}

#[test]
fn index_mapping_follows_the_alphabet() {
    // Indices come from the letter's position in the alphabet argument,
    // not from a fixed global component ordering.
    let job = Job::new("xyz", "float", "Vector");
    assert_eq!(
        definition(&job, &[2, 1]),
        "inline const Vector2 Vector3::zy() const {return Swizzle<2, 1>();}"
    );

    let reversed = Job::new("yx", "float", "Vector");
    assert_eq!(
        definition(&reversed, &[0]),
        "inline float Vector2::y() const {return Swizzle<0>();}"
    );

    let mut buffer = Vec::new();
    definitions(&job, &mut buffer).unwrap();
    assert!(lines(&buffer)
        .contains(&"inline const Vector2 Vector3::zy() const {return Swizzle<2, 1>();}".to_string()));
}

#[test]
fn declarations_and_definitions_pair_up() {
    fn accessor(line: &str) -> String {
        let end = line.find("() const").unwrap();
        let start = line[..end].rfind(|c: char| c.is_whitespace() || c == ':').unwrap() + 1;
        line[start..end].to_string()
    }

    let job = Job::new("xyz", "float", "Vector");

    let mut decls = Vec::new();
    declarations(&job, &mut decls).unwrap();
    let mut defs = Vec::new();
    definitions(&job, &mut defs).unwrap();

    let decl_names: Vec<String> = lines(&decls).iter().map(|l| accessor(l)).collect();
    let def_names: Vec<String> = lines(&defs).iter().map(|l| accessor(l)).collect();

    assert_eq!(decl_names, def_names);
}

#[test]
fn bool_vector4() {
    let job = Job::new("xyzw", "bool", "BVector");

    let mut buffer = Vec::new();
    declarations(&job, &mut buffer).unwrap();
    let decls = lines(&buffer);
    assert_eq!(decls[0], "\tbool x() const;");
    assert_eq!(decls.iter().filter(|l| l.contains("BVector2")).count(), 16);

    let mut buffer = Vec::new();
    definitions(&job, &mut buffer).unwrap();
    assert!(lines(&buffer).iter().all(|l| l.contains("BVector4::")));
}

#[test]
fn full_run_order() {
    let mut buffer = Vec::new();
    generate_all(&fixed_jobs(), &mut buffer).unwrap();
    let lines = lines(&buffer);

    // 30 + 120 + 340 lines per scalar type, for each of the two passes.
    assert_eq!(lines.len(), 2 * 2 * (30 + 120 + 340));

    // All declarations precede all definitions.
    assert_eq!(lines[0], "\tfloat x() const;");
    assert_eq!(lines[979], "\tconst BVector4 wwww() const;");
    assert_eq!(
        lines[980],
        "inline float Vector2::x() const {return Swizzle<0>();}"
    );
    assert_eq!(
        lines[1959],
        "inline const BVector4 BVector4::wwww() const {return Swizzle<3, 3, 3, 3>();}"
    );
}

#[test]
fn empty_alphabet_is_rejected() {
    let job = Job::new("", "float", "Vector");
    let mut buffer = Vec::new();
    assert!(match declarations(&job, &mut buffer) {
        Err(GenError::EmptyAlphabet) => true,
        _ => false,
    });
    assert!(match definitions(&job, &mut buffer) {
        Err(GenError::EmptyAlphabet) => true,
        _ => false,
    });
    assert!(buffer.is_empty());
}
