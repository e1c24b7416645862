//! Fragments bundled with the client
//!
//! Registered by [`FragmentLibrary::with_builtin`](super::FragmentLibrary::with_builtin).
//! Fragment names follow the GraphQL type they select on; `Slim*` variants
//! carry just enough to identify and match an entity.

pub const STASH_ID: &str = r#"
fragment StashID on StashID {
  endpoint
  stash_id
  updated_at
}
"#;

pub const TAG: &str = r#"
fragment SlimTag on Tag {
  id
  name
  aliases
}

fragment Tag on Tag {
  id
  name
  sort_name
  description
  aliases
  ignore_auto_tag
  favorite
  image_path
  parents { ...SlimTag }
  children { ...SlimTag }
  created_at
  updated_at
}
"#;

pub const STUDIO: &str = r#"
fragment SlimStudio on Studio {
  id
  name
  aliases
}

fragment Studio on Studio {
  id
  name
  urls
  aliases
  details
  rating100
  favorite
  ignore_auto_tag
  image_path
  parent_studio { ...SlimStudio }
  tags { ...SlimTag }
  stash_ids { ...StashID }
  created_at
  updated_at
}
"#;

pub const PERFORMER: &str = r#"
fragment SlimPerformer on Performer {
  id
  name
  disambiguation
  alias_list
}

fragment Performer on Performer {
  id
  name
  disambiguation
  alias_list
  urls
  gender
  birthdate
  death_date
  ethnicity
  country
  eye_color
  hair_color
  height_cm
  weight
  measurements
  fake_tits
  penis_length
  circumcised
  career_length
  tattoos
  piercings
  details
  favorite
  ignore_auto_tag
  rating100
  image_path
  tags { ...SlimTag }
  stash_ids { ...StashID }
  created_at
  updated_at
}
"#;

pub const GROUP: &str = r#"
fragment SlimGroup on Group {
  id
  name
  aliases
}

fragment Group on Group {
  id
  name
  aliases
  duration
  date
  rating100
  director
  synopsis
  urls
  front_image_path
  back_image_path
  studio { ...SlimStudio }
  tags { ...SlimTag }
  created_at
  updated_at
}
"#;

pub const SCENE: &str = r#"
fragment VideoFile on VideoFile {
  id
  path
  size
  duration
  video_codec
  audio_codec
  width
  height
  frame_rate
  bit_rate
  fingerprints { type value }
}

fragment Scene on Scene {
  id
  title
  code
  details
  director
  urls
  date
  rating100
  organized
  o_counter
  files { ...VideoFile }
  studio { ...SlimStudio }
  tags { ...SlimTag }
  performers { ...SlimPerformer }
  groups {
    group { ...SlimGroup }
    scene_index
  }
  stash_ids { ...StashID }
  created_at
  updated_at
}
"#;

/// Every bundled fragment block
pub const FRAGMENTS: &[&str] = &[STASH_ID, TAG, STUDIO, PERFORMER, GROUP, SCENE];
