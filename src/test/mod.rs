mod directives;
mod workload_assign;
