/// apt relation keys that introduce a hard dependency
const DEPENDENCY_RELATIONS: [&str; 3] = ["Depends", "PreDepends", "Pre-Depends"];

/// apt relation keys that are not dependencies of the package
const OTHER_RELATIONS: [&str; 6] = [
    "Recommends",
    "Suggests",
    "Conflicts",
    "Breaks",
    "Replaces",
    "Enhances",
];

/// apk and rpm capability namespaces that never name a package
const CAPABILITY_PREFIXES: [&str; 3] = ["so:", "cmd:", "pc:"];

/// Characters that start a version constraint or qualifier
const CONSTRAINT_START: [char; 5] = ['>', '<', '=', '~', '('];

/// Reduces one raw dependency line, as printed by `apt-cache depends`,
/// `apk info -d` or `rpm -qR`, to the package name it refers to.
pub struct DependencyNamePolicy;

impl DependencyNamePolicy {
    /// Returns the candidate package name, or `None` when the line does not
    /// name a package dependency (other apt relations, capabilities, file paths).
    ///
    /// Examples of accepted forms: `Depends: libc6`, `|Depends: <awk>`,
    /// `libc6 (>= 2.34)`, `musl>=1.2`, `python3:any`.
    pub fn candidate_name(raw: &str) -> Option<&str> {
        let mut token = raw.trim().trim_start_matches('|').trim_start();

        if let Some((key, value)) = token.split_once(':') {
            let key = key.trim();
            if DEPENDENCY_RELATIONS.contains(&key) {
                token = value.trim().trim_start_matches('|').trim_start();
            } else if OTHER_RELATIONS.contains(&key) {
                return None;
            }
        }

        if CAPABILITY_PREFIXES.iter().any(|p| token.starts_with(p)) || token.starts_with('/') {
            return None;
        }

        let token = token
            .strip_prefix('<')
            .and_then(|t| t.split_once('>').map(|(name, _)| name))
            .unwrap_or(token);

        let end = token
            .find(|c: char| CONSTRAINT_START.contains(&c) || c.is_whitespace())
            .unwrap_or(token.len());
        let token = &token[..end];

        let token = match token.rsplit_once(':') {
            Some((name, arch)) if !arch.is_empty() && is_arch_qualifier(arch) => name,
            _ => token,
        };

        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

impl DependencyNamePolicy {
    /// Keeps the lines of a dependency listing that belong to a hard
    /// dependency relation.
    ///
    /// `apt-cache depends` prints the providers of a `<virtual>` target on
    /// the following unkeyed lines, so an unkeyed line belongs to the most
    /// recent relation key. Listings without relation keys (apk, rpm) keep
    /// every line.
    pub fn dependency_lines(raw: &[String]) -> impl Iterator<Item = &str> + '_ {
        let mut in_dependency_relation = true;
        raw.iter().filter_map(move |line| match relation_key(line) {
            Some(key) => {
                in_dependency_relation = DEPENDENCY_RELATIONS.contains(&key);
                in_dependency_relation.then_some(line.as_str())
            }
            None => in_dependency_relation.then_some(line.as_str()),
        })
    }
}

/// The apt relation key of a line, if it starts with one.
fn relation_key(line: &str) -> Option<&str> {
    let token = line.trim().trim_start_matches('|').trim_start();
    let (key, _) = token.split_once(':')?;
    let key = key.trim();
    (DEPENDENCY_RELATIONS.contains(&key) || OTHER_RELATIONS.contains(&key)).then_some(key)
}

fn is_arch_qualifier(qualifier: &str) -> bool {
    qualifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
