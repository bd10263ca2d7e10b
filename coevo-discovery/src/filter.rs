//! Candidate filtering over repository trees

/// Directories whose MPS files mark a repository as holding model instances
const CANDIDATE_DIRS: &[&str] = &["/solutions/", "/examples/", "/tests/"];

/// True when the path is an MPS file under a model-bearing directory
pub fn is_candidate_model_path(path: &str) -> bool {
    path.ends_with(".mps") && CANDIDATE_DIRS.iter().any(|dir| path.contains(dir))
}

/// True when any path of a repository tree qualifies as a model file
pub fn is_candidate_model_tree<S: AsRef<str>>(paths: &[S]) -> bool {
    paths
        .iter()
        .any(|path| is_candidate_model_path(path.as_ref()))
}
