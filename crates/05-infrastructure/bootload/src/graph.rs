//! 启动模块依赖图检查
//!
//! 只检查静态依赖，不实例化任何模块。

use crate::definition::BootloaderDefinition;
use infrastructure_common::{BootError, BootResult, Identifier};
use std::collections::{HashMap, HashSet};

/// 深度优先检查依赖缺失和循环依赖
pub(crate) fn validate(definitions: &HashMap<Identifier, BootloaderDefinition>) -> BootResult<()> {
    let mut roots: Vec<&Identifier> = definitions.keys().collect();
    roots.sort();

    let mut visited = HashSet::new();
    let mut visiting = Vec::new();
    for root in roots {
        dfs_check(root, definitions, &mut visited, &mut visiting)?;
    }
    Ok(())
}

fn dfs_check<'d>(
    current: &'d Identifier,
    definitions: &'d HashMap<Identifier, BootloaderDefinition>,
    visited: &mut HashSet<&'d Identifier>,
    visiting: &mut Vec<&'d Identifier>,
) -> BootResult<()> {
    if visiting.contains(&current) {
        let chain = visiting
            .iter()
            .skip_while(|id| **id != current)
            .map(|id| id.as_str())
            .chain(std::iter::once(current.as_str()))
            .collect::<Vec<_>>()
            .join(" -> ");
        return Err(BootError::CircularDependency { chain });
    }

    if visited.contains(current) {
        return Ok(());
    }

    let definition = definitions
        .get(current)
        .ok_or_else(|| BootError::class_not_found(current.as_str()))?;

    visiting.push(current);
    for dependency in definition.dependencies() {
        dfs_check(dependency, definitions, visited, visiting)?;
    }
    visiting.pop();
    visited.insert(current);

    Ok(())
}
