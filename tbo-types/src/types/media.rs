//! Flat media and attachment entities.

wire_struct! {
    /// One size of a photo or a file/sticker thumbnail.
    pub struct PhotoSize {
        required scalar file_id: String,
        required scalar width: i32,
        required scalar height: i32,
        optional scalar file_size: i64,
    }
}

wire_struct! {
    /// An audio file to be treated as music by the Telegram clients.
    pub struct Audio {
        required scalar file_id: String,
        required scalar duration: i32,
        optional scalar performer: String,
        optional scalar title: String,
        optional scalar mime_type: String,
        optional scalar file_size: i64,
    }
}

wire_struct! {
    /// A general file (as opposed to photos, voice messages and audio files).
    pub struct Document {
        required scalar file_id: String,
        optional nested thumb: PhotoSize,
        optional scalar file_name: String,
        optional scalar mime_type: String,
        optional scalar file_size: i64,
    }
}

wire_struct! {
    pub struct Sticker {
        required scalar file_id: String,
        required scalar width: i32,
        required scalar height: i32,
        optional nested thumb: PhotoSize,
        optional scalar file_size: i64,
    }
}

wire_struct! {
    pub struct Video {
        required scalar file_id: String,
        required scalar width: i32,
        required scalar height: i32,
        /// Seconds, as defined by the sender.
        required scalar duration: i32,
        optional nested thumb: PhotoSize,
        optional scalar mime_type: String,
        optional scalar file_size: i64,
    }
}

wire_struct! {
    /// A voice note.
    pub struct Voice {
        required scalar file_id: String,
        required scalar duration: i32,
        optional scalar mime_type: String,
        optional scalar file_size: i64,
    }
}

wire_struct! {
    /// A phone contact.
    pub struct Contact {
        required scalar phone_number: String,
        required scalar first_name: String,
        optional scalar last_name: String,
        optional scalar user_id: i64,
    }
}

wire_struct! {
    /// A point on the map.
    pub struct Location {
        required scalar longitude: f64,
        required scalar latitude: f64,
    }
}

wire_struct! {
    pub struct Venue {
        required nested location: Location,
        required scalar title: String,
        required scalar address: String,
        optional scalar foursquare_id: String,
    }
}

wire_struct! {
    /// A user's profile pictures: one row of sizes per picture.
    pub struct UserProfilePhotos {
        required scalar total_count: i32,
        required array_of_array photos: PhotoSize,
    }
}

wire_struct! {
    /// A file ready to be downloaded.
    ///
    /// `file_path` is only valid for a limited time; fetch it again with
    /// `getFile` when the link has expired.
    pub struct File {
        required scalar file_id: String,
        optional scalar file_size: i64,
        optional scalar file_path: String,
    }
}

impl PhotoSize {
    /// Pixel count, handy for picking the largest size out of a photo array.
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}
