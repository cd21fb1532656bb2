use crate::util::constants::LOG_BYTES_IN_GBYTE;
use crate::util::constants::LOG_BYTES_IN_KBYTE;
use crate::util::constants::LOG_BYTES_IN_MBYTE;
use regex::Regex;
use std::default::Default;
use std::path::PathBuf;
use std::str::FromStr;

/// The default size in bytes of a newly created region.
pub const DEFAULT_REGION_SIZE: usize = 256 << LOG_BYTES_IN_MBYTE;

/// A byte count for sizing the region. Parses either a plain number of bytes
/// or a number with a `k`/`m`/`g` suffix (an optional trailing `b` is
/// accepted), e.g. `268435456`, `256m`, `1gb`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionSize(pub usize);

lazy_static! {
    static ref MEMORY_SIZE_RE: Regex = Regex::new(r"^(\d+)\s*([kKmMgG]?)[bB]?$").unwrap();
}

fn parse_memory_size(s: &str) -> Result<usize, String> {
    let captures = MEMORY_SIZE_RE
        .captures(s.trim())
        .ok_or_else(|| format!("cannot parse memory size: {:?}", s))?;
    let number = captures[1]
        .parse::<usize>()
        .map_err(|e| format!("cannot parse memory size {:?}: {}", s, e))?;
    let shift = match &captures[2] {
        "" => 0,
        "k" | "K" => LOG_BYTES_IN_KBYTE,
        "m" | "M" => LOG_BYTES_IN_MBYTE,
        "g" | "G" => LOG_BYTES_IN_GBYTE,
        _ => unreachable!(),
    };
    number
        .checked_mul(1usize << shift)
        .ok_or_else(|| format!("memory size overflows usize: {:?}", s))
}

impl FromStr for RegionSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_memory_size(s).map(RegionSize)
    }
}

/// Where the region's memory comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackingSelector {
    /// Private anonymous demand-zero memory.
    Anonymous,
    /// A file of the region's size on (preferably fast) storage, mapped
    /// shared. The string form is `File:<path>`.
    File(PathBuf),
}

impl FromStr for BackingSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Anonymous" {
            Ok(BackingSelector::Anonymous)
        } else if let Some(path) = s.strip_prefix("File:") {
            if path.is_empty() {
                Err("File backing needs a path, e.g. File:/mnt/nvme/region.img".to_string())
            } else {
                Ok(BackingSelector::File(PathBuf::from(path)))
            }
        } else {
            Err(format!("unknown backing selector: {:?}", s))
        }
    }
}

fn always_valid<T>(_: &T) -> bool {
    true
}

macro_rules! options {
    ($($name:ident: $type:ty[$validator:expr] = $default:expr),*,) => [
        options!($($name: $type[$validator] = $default),*);
    ];
    ($($name:ident: $type:ty[$validator:expr] = $default:expr),*) => [
        // Clone so a builder can keep its copy while the built instance
        // carries its own.
        #[derive(Clone)]
        pub struct Options {
            $(pub $name: $type),*
        }
        impl Options {
            pub fn set_from_str(&mut self, s: &str, val: &str) -> bool {
                match s {
                    // Parse the given value from str (by env vars or by calling process()) to the right type
                    $(stringify!($name) => if let Ok(ref val) = val.parse::<$type>() {
                        // Validate
                        let validate_fn = $validator;
                        let is_valid = validate_fn(val);
                        if is_valid {
                            // Only set value if valid.
                            self.$name = val.clone();
                        } else {
                            eprintln!("Warn: unable to set {}={:?}. Invalid value. Default value will be used.", s, val);
                        }
                        is_valid
                    } else {
                        eprintln!("Warn: unable to set {}={:?}. Cant parse value. Default value will be used.", s, val);
                        false
                    },)*
                    _ => {
                        eprintln!("Warn: unknown option {}. Ignored.", s);
                        false
                    }
                }
            }
        }
        impl Default for Options {
            fn default() -> Self {
                let mut options = Options {
                    $($name: $default),*
                };

                // If we have env vars that start with TIERSPACE_ and match any option
                // (such as TIERSPACE_REGION_SIZE), we set the option to its value (if it
                // is a valid value). Otherwise, use the default value.
                const PREFIX: &str = "TIERSPACE_";
                for (key, val) in std::env::vars() {
                    // strip the prefix, and get the lower case string
                    if let Some(rest_of_key) = key.strip_prefix(PREFIX) {
                        let lowercase: &str = &rest_of_key.to_lowercase();
                        match lowercase {
                            $(stringify!($name) => { options.set_from_str(lowercase, &val); },)*
                            _ => {}
                        }
                    }
                }
                options
            }
        }
    ]
}

options! {
    // The size in bytes of the region created by create_region. Accepts k/m/g suffixes.
    region_size:        RegionSize      [|v: &RegionSize| v.0 > 0] = RegionSize(DEFAULT_REGION_SIZE),
    // Where the region's memory comes from: Anonymous, or File:<path> for a
    // region that lives on a storage device.
    backing:            BackingSelector [always_valid] = BackingSelector::Anonymous,
    // Trace-log every reservation and promotion. Off by default: the fast
    // path stays branch-light.
    verbose_region_ops: bool            [always_valid] = false,
}

impl Options {
    /// Set an option from a camelCase name, as option strings arrive from
    /// embedders (e.g. "regionSize"). Underscore names are accepted as-is.
    pub fn set_from_camelcase_str(&mut self, s: &str, val: &str) -> bool {
        trace!("Trying to process option pair: ({}, {})", s, val);

        let mut sr = String::with_capacity(s.len());
        for c in s.chars() {
            if c.is_uppercase() {
                sr.push('_');
                for c in c.to_lowercase() {
                    sr.push(c);
                }
            } else {
                sr.push(c)
            }
        }

        let result = self.set_from_str(sr.as_str(), val);

        if result {
            trace!("Validation passed");
        } else {
            trace!("Validation failed")
        }
        result
    }
}
