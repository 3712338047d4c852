//! Post-processing steps requested from the native importer.

bitflags::bitflags! {
    /// Processing steps, combined into the bitmask passed to the import
    /// entry point. Bit values are part of the native ABI.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ProcessingFlags: u32 {
        const CALC_TANGENT_SPACE = 0x1;
        const JOIN_IDENTICAL_VERTICES = 0x2;
        const MAKE_LEFT_HANDED = 0x4;
        const TRIANGULATE = 0x8;
        const REMOVE_COMPONENT = 0x10;
        const GEN_NORMALS = 0x20;
        const GEN_SMOOTH_NORMALS = 0x40;
        const SPLIT_LARGE_MESHES = 0x80;
        const PRETRANSFORM_VERTICES = 0x100;
        const LIMIT_BONE_WEIGHTS = 0x200;
        const VALIDATE_DATA_STRUCTURE = 0x400;
        const IMPROVE_CACHE_LOCALITY = 0x800;
        const REMOVE_REDUNDANT_MATERIALS = 0x1000;
        const FIX_INFACING_NORMALS = 0x2000;
        const SORT_BY_PTYPE = 0x8000;
        const FIND_DEGENERATES = 0x10000;
        const FIND_INVALID_DATA = 0x20000;
        const GEN_UV_COORDS = 0x40000;
        const TRANSFORM_UV_COORDS = 0x80000;
        const FIND_INSTANCES = 0x100000;
        const OPTIMIZE_MESHES = 0x200000;
        const OPTIMIZE_GRAPH = 0x400000;
        const FLIP_UVS = 0x800000;
        const FLIP_WINDING_ORDER = 0x1000000;
        const SPLIT_BY_BONE_COUNT = 0x2000000;
        const DEBONE = 0x4000000;
    }
}

/// Config-facing names, one per flag.
static NAMES: [(&str, ProcessingFlags); 26] = [
    ("calc-tangent-space", ProcessingFlags::CALC_TANGENT_SPACE),
    ("join-identical-vertices", ProcessingFlags::JOIN_IDENTICAL_VERTICES),
    ("make-left-handed", ProcessingFlags::MAKE_LEFT_HANDED),
    ("triangulate", ProcessingFlags::TRIANGULATE),
    ("remove-component", ProcessingFlags::REMOVE_COMPONENT),
    ("gen-normals", ProcessingFlags::GEN_NORMALS),
    ("gen-smooth-normals", ProcessingFlags::GEN_SMOOTH_NORMALS),
    ("split-large-meshes", ProcessingFlags::SPLIT_LARGE_MESHES),
    ("pretransform-vertices", ProcessingFlags::PRETRANSFORM_VERTICES),
    ("limit-bone-weights", ProcessingFlags::LIMIT_BONE_WEIGHTS),
    ("validate-data-structure", ProcessingFlags::VALIDATE_DATA_STRUCTURE),
    ("improve-cache-locality", ProcessingFlags::IMPROVE_CACHE_LOCALITY),
    ("remove-redundant-materials", ProcessingFlags::REMOVE_REDUNDANT_MATERIALS),
    ("fix-infacing-normals", ProcessingFlags::FIX_INFACING_NORMALS),
    ("sort-by-ptype", ProcessingFlags::SORT_BY_PTYPE),
    ("find-degenerates", ProcessingFlags::FIND_DEGENERATES),
    ("find-invalid-data", ProcessingFlags::FIND_INVALID_DATA),
    ("gen-UV-coords", ProcessingFlags::GEN_UV_COORDS),
    ("transform-UV-coords", ProcessingFlags::TRANSFORM_UV_COORDS),
    ("find-instances", ProcessingFlags::FIND_INSTANCES),
    ("optimize-meshes", ProcessingFlags::OPTIMIZE_MESHES),
    ("optimize-graph", ProcessingFlags::OPTIMIZE_GRAPH),
    ("flip-UVs", ProcessingFlags::FLIP_UVS),
    ("flip-winding-order", ProcessingFlags::FLIP_WINDING_ORDER),
    ("split-by-bone-count", ProcessingFlags::SPLIT_BY_BONE_COUNT),
    ("debone", ProcessingFlags::DEBONE),
];

impl ProcessingFlags {
    /// Look up a single flag by its config name, e.g. `gen-UV-coords`.
    /// Matching is exact; the bitflags constant names (`TRIANGULATE`) are
    /// not accepted here.
    pub fn from_kebab_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, flag)| flag)
    }

    /// Kebab-case name of a single flag. `None` for empty or combined sets.
    pub fn name(self) -> Option<&'static str> {
        NAMES.iter().find(|(_, f)| *f == self).map(|&(n, _)| n)
    }

    /// Kebab-case names of every flag in the set, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMES
            .iter()
            .filter(move |(_, f)| self.contains(*f))
            .map(|&(n, _)| n)
    }

    /// OR together any number of flags. Duplicates are harmless.
    pub fn union_all<I: IntoIterator<Item = ProcessingFlags>>(flags: I) -> Self {
        flags.into_iter().fold(Self::empty(), |acc, f| acc | f)
    }
}
